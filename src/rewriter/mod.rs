//! 改写模块：规则解析、注册与按序执行
pub mod engine;
pub mod global;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod rule_set;
pub mod rules;

/// 强制追加在规则列表末尾的规则（PDF下载链接）
pub const MANDATORY_TRAILING_RULE: &str = rules::pdf_link::NAME;

// 导出核心接口
pub use self::engine::Rewriter;
pub use self::global::{global_rewriter, init_rewriter, rewrite};
pub use self::registry::{Rule, RuleRegistry};
pub use self::report::{RewriteReport, RuleOutcome, RuleStep};
pub use self::resolver::{DomainRule, RuleResolver};
pub use self::rule_set::RuleSet;
