//! 规则注册表：规则名 -> 改写函数
//! 新规则只需注册即可被引擎调度，无需修改引擎的执行逻辑

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::warn;

use super::report::RuleOutcome;
use super::rules;
use crate::error::{RewriterError, RwResult};
use crate::utils::preview_compact;

/// 改写函数：(条目URL, 内容) -> 新内容
pub type RewriteFn = Arc<dyn Fn(&str, &str) -> RwResult<String> + Send + Sync>;

/// 已注册的单条规则
#[derive(Clone)]
pub struct Rule {
    name: String,
    transform: RewriteFn,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Rule {
    pub fn new<F>(name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&str, &str) -> RwResult<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            transform: Arc::new(transform),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 执行规则；规则内部的panic被就地捕获并转换为错误
    pub fn apply(&self, entry_url: &str, content: &str) -> RwResult<String> {
        panic::catch_unwind(AssertUnwindSafe(|| (self.transform)(entry_url, content)))
            .unwrap_or_else(|_| Err(RewriterError::TransformPanicked(self.name.clone())))
    }

    /// 失败即回退：任何错误（含panic）都返回原内容，并给出本步的执行结果
    pub fn apply_fail_open(&self, entry_url: &str, content: &str) -> (String, RuleOutcome) {
        match self.apply(entry_url, content) {
            Ok(output) if output == content => (output, RuleOutcome::Unchanged),
            Ok(output) => (output, RuleOutcome::Applied),
            Err(e) => {
                warn!(
                    "[Rewrite] 规则 {} 执行失败，已回退原内容：{}，url={}，content={}",
                    self.name,
                    e,
                    entry_url,
                    preview_compact(content, 80)
                );
                (content.to_string(), RuleOutcome::FailedOpen(e.to_string()))
            }
        }
    }
}

/// 规则注册表
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Rule>,
}

impl RuleRegistry {
    /// 空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置全部内置规则的注册表
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        rules::register_builtin_rules(&mut registry);
        registry
    }

    /// 注册规则，同名规则被替换并返回旧规则
    pub fn register<F>(&mut self, name: impl Into<String>, transform: F) -> Option<Rule>
    where
        F: Fn(&str, &str) -> RwResult<String> + Send + Sync + 'static,
    {
        let rule = Rule::new(name, transform);
        self.rules.insert(rule.name.clone(), rule)
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// 已注册的规则名（字典序）
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
