//! 全局配置管理,存储所有可配置项

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RewriterError, RwResult};
use crate::utils::input_guard::HtmlInputGuard;

/// 用户追加的域名规则（优先于内置规则表匹配）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRuleEntry {
    pub domain: String,
    pub rules: String,
}

/// 全局配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriterConfig {
    // 单次改写允许的最大内容长度（单位：字节），超出则原样返回
    pub max_content_len: usize,
    // 追加的域名规则，按文件顺序排在内置规则表之前
    pub domain_rules: Vec<DomainRuleEntry>,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            max_content_len: HtmlInputGuard::MAX_HTML_LEN,
            domain_rules: Vec::new(),
            verbose: false,
        }
    }
}

impl RewriterConfig {
    /// 从JSON字符串加载配置，缺省字段使用默认值
    pub fn from_json_str(json: &str) -> RwResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从JSON文件加载配置
    pub fn from_json_file(path: impl AsRef<Path>) -> RwResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> RwResult<()> {
        if self.max_content_len == 0 {
            return Err(RewriterError::ConfigLoadError("max_content_len 不能为 0".to_string()));
        }
        if let Some(entry) = self.domain_rules.iter().find(|e| e.domain.trim().is_empty()) {
            return Err(RewriterError::ConfigLoadError(format!(
                "域名规则的 domain 不能为空（rules={}）",
                entry.rules
            )));
        }
        Ok(())
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> RewriterConfig {
        RewriterConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: RewriterConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_content_len(mut self, len: usize) -> Self {
        self.config.max_content_len = len;
        self
    }

    /// 追加一条域名规则，先追加的先匹配
    pub fn domain_rule(mut self, domain: impl Into<String>, rules: impl Into<String>) -> Self {
        self.config.domain_rules.push(DomainRuleEntry {
            domain: domain.into(),
            rules: rules.into(),
        });
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> RewriterConfig {
        self.config
    }
}
