//! 单次改写的执行报告，便于调试与CLI输出

use serde::Serialize;

use super::rule_set::RuleSet;

/// 单条规则的执行结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum RuleOutcome {
    /// 内容被修改
    Applied,
    /// 规则已执行，但内容未变化
    Unchanged,
    /// 未注册的规则名，静默跳过
    Unknown,
    /// 规则内部失败，已回退为执行前的内容
    FailedOpen(String),
    /// 输入超出限制，未执行
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleStep {
    pub rule: String,
    #[serde(flatten)]
    pub outcome: RuleOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteReport {
    pub entry_url: String,
    pub rules: RuleSet,
    pub steps: Vec<RuleStep>,
}

impl RewriteReport {
    pub fn new(entry_url: &str, rules: RuleSet) -> Self {
        Self {
            entry_url: entry_url.to_string(),
            rules,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, rule: &str, outcome: RuleOutcome) {
        self.steps.push(RuleStep {
            rule: rule.to_string(),
            outcome,
        });
    }

    /// 是否有任意规则修改了内容
    pub fn changed(&self) -> bool {
        self.steps.iter().any(|s| s.outcome == RuleOutcome::Applied)
    }

    /// 回退过的规则名
    pub fn failed_rules(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, RuleOutcome::FailedOpen(_)))
            .map(|s| s.rule.as_str())
            .collect()
    }
}
