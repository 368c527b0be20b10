//! rsrewriter - 订阅条目 HTML 内容改写引擎
//! 按条目 URL 的域名解析预置规则（或使用自定义规则），追加强制的 PDF 下载链接规则，
//! 逐条执行；任何规则失败都回退到该步之前的内容，对调用方永不报错

// 导出全局错误类型
pub use self::error::{RewriterError, RwResult};

// 导出配置模块
pub use self::config::{ConfigManager, CustomConfigBuilder, DomainRuleEntry, RewriterConfig};

// 导出改写模块核心接口
pub use self::rewriter::{
    global_rewriter, init_rewriter, rewrite, DomainRule, RewriteReport, Rewriter, Rule,
    RuleOutcome, RuleRegistry, RuleResolver, RuleSet, RuleStep, MANDATORY_TRAILING_RULE,
};

// 导出提取模块核心接口
pub use self::extractor::{ContentInspector, ContentProfile};

// 导出存储边界接口
pub use self::storage::{
    BroadcastPublisher, Category, CategoryStore, EntityKind, EntityOp, MemoryCategoryStore,
    NoopPublisher, SyncEvent, SyncPublisher,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod extractor;
pub mod rewriter;
pub mod storage;
pub mod utils;
