//! 改写引擎：确定规则列表，追加强制规则，按顺序折叠执行

use std::time::Instant;

use tracing::{debug, warn};

use super::registry::RuleRegistry;
use super::report::{RewriteReport, RuleOutcome};
use super::resolver::RuleResolver;
use super::rule_set::RuleSet;
use super::MANDATORY_TRAILING_RULE;
use crate::config::RewriterConfig;
use crate::utils::HtmlInputGuard;

/// 条目内容改写器
/// 初始化后只读，可在多线程间共享
#[derive(Debug, Clone)]
pub struct Rewriter {
    registry: RuleRegistry,
    resolver: RuleResolver,
    config: RewriterConfig,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new(RewriterConfig::default())
    }
}

impl Rewriter {
    /// 使用内置规则创建改写器
    pub fn new(config: RewriterConfig) -> Self {
        Self::with_registry(config, RuleRegistry::with_builtin_rules())
    }

    /// 使用自定义注册表创建改写器
    pub fn with_registry(config: RewriterConfig, registry: RuleRegistry) -> Self {
        Self {
            registry,
            resolver: RuleResolver::from_config(&config),
            config,
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &RuleResolver {
        &self.resolver
    }

    pub fn config(&self) -> &RewriterConfig {
        &self.config
    }

    /// 计算最终执行的规则列表
    /// 自定义规则非空（含纯空白）时完全替代域名预置规则，末尾总是追加强制规则
    pub fn plan(&self, entry_url: &str, custom_rules: &str) -> RuleSet {
        let rules = if custom_rules.is_empty() {
            self.resolver.resolve(entry_url)
        } else {
            custom_rules
        };

        let mut rule_set = RuleSet::parse(rules);
        rule_set.push(MANDATORY_TRAILING_RULE);
        rule_set
    }

    /// 改写条目内容；永不失败，最坏情况返回原内容
    pub fn rewrite(&self, entry_url: &str, entry_content: &str, custom_rules: &str) -> String {
        self.rewrite_with_report(entry_url, entry_content, custom_rules).0
    }

    /// 改写条目内容并返回逐条规则的执行报告
    pub fn rewrite_with_report(
        &self,
        entry_url: &str,
        entry_content: &str,
        custom_rules: &str,
    ) -> (String, RewriteReport) {
        let start = Instant::now();
        let rule_set = self.plan(entry_url, custom_rules);
        debug!("[Rewrite] 应用规则 {:?}，条目 {:?}", rule_set.as_slice(), entry_url);

        let mut report = RewriteReport::new(entry_url, rule_set.clone());

        if let Err(e) = HtmlInputGuard::guard(entry_content, self.config.max_content_len) {
            warn!("[Rewrite] 跳过改写：{}，url={}", e, entry_url);
            for rule in rule_set.iter() {
                report.record(rule, RuleOutcome::Skipped);
            }
            return (entry_content.to_string(), report);
        }

        let mut content = entry_content.to_string();
        for name in rule_set.iter() {
            let Some(rule) = self.registry.get(name) else {
                debug!("[Rewrite] 未知规则 {:?}，跳过", name);
                report.record(name, RuleOutcome::Unknown);
                continue;
            };

            let (output, outcome) = rule.apply_fail_open(entry_url, &content);
            content = output;
            report.record(name, outcome);
        }

        if self.config.verbose {
            debug!(
                "[Rewrite] 改写完成，耗时{:?}，规则{}条，修改={}，内容 {} -> {} 字节",
                start.elapsed(),
                report.steps.len(),
                report.changed(),
                entry_content.len(),
                content.len()
            );
        }

        (content, report)
    }
}
