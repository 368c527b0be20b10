//! 规则解析器：按域名子串匹配预置规则
//! 规则表是有序列表而非映射，按固定顺序逐条匹配，首个命中即返回

use tracing::warn;
use url::Url;

use crate::config::RewriterConfig;

/// 内置域名规则表（顺序即优先级）
const PREDEFINED_RULES: &[(&str, &str)] = &[
    ("abstrusegoose.com", "add_image_title"),
    ("amazingsuperpowers.com", "add_image_title"),
    ("cowbirdsinlove.com", "add_image_title"),
    ("drawingboardcomic.com", "add_image_title"),
    ("exocomics.com", "add_image_title"),
    ("happletea.com", "add_image_title"),
    ("imogenquest.net", "add_image_title"),
    ("lukesurl.com", "add_image_title"),
    ("mercworks.net", "add_image_title"),
    ("mrlovenstein.com", "add_image_title"),
    ("nedroid.com", "add_image_title"),
    ("oglaf.com", "add_image_title"),
    ("optipess.com", "add_image_title"),
    ("peebleslab.com", "add_image_title"),
    ("sentfromthemoon.com", "add_image_title"),
    ("thedoghousediaries.com", "add_image_title"),
    ("treelobsters.com", "add_image_title"),
    ("xkcd.com", "add_image_title"),
    ("youtube.com", "add_youtube_video"),
    ("balipost.com", "cleanup_balipost,add_dynamic_image"),
    ("metrobali.com", "cleanup_metrobali,hide_first_image"),
    ("balipuspanews.com", "cleanup_balipuspanews,add_dynamic_image"),
];

/// 域名子串 -> 规则字符串
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRule {
    pub domain: String,
    pub rules: String,
}

impl DomainRule {
    pub fn new(domain: &str, rules: &str) -> Self {
        Self {
            domain: domain.trim().to_ascii_lowercase(),
            rules: rules.to_string(),
        }
    }
}

/// 规则解析器，初始化后只读
#[derive(Debug, Clone)]
pub struct RuleResolver {
    mapping: Vec<DomainRule>,
}

impl Default for RuleResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleResolver {
    /// 仅包含内置规则表
    pub fn builtin() -> Self {
        Self {
            mapping: PREDEFINED_RULES
                .iter()
                .map(|(domain, rules)| DomainRule::new(domain, rules))
                .collect(),
        }
    }

    /// 配置中的域名规则排在内置规则表之前
    /// 空域名会命中任意URL，直接丢弃
    pub fn from_config(config: &RewriterConfig) -> Self {
        let mut mapping: Vec<DomainRule> = config
            .domain_rules
            .iter()
            .map(|entry| DomainRule::new(&entry.domain, &entry.rules))
            .filter(|rule| {
                if rule.domain.is_empty() {
                    warn!("[Resolver] 忽略空域名规则：rules={:?}", rule.rules);
                }
                !rule.domain.is_empty()
            })
            .collect();
        mapping.extend(Self::builtin().mapping);
        Self { mapping }
    }

    /// 返回首个命中的规则字符串，未命中返回空串
    pub fn resolve(&self, entry_url: &str) -> &str {
        let domain = Self::domain_of(entry_url);

        self.mapping
            .iter()
            .find(|rule| domain.contains(&rule.domain))
            .map(|rule| rule.rules.as_str())
            .unwrap_or("")
    }

    /// 提取URL的主机名（小写）；无法解析时原样使用输入
    pub fn domain_of(entry_url: &str) -> String {
        Url::parse(entry_url.trim())
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| entry_url.to_string())
            .to_ascii_lowercase()
    }

    pub fn mappings(&self) -> &[DomainRule] {
        &self.mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;

    #[test]
    fn test_resolve_builtin() {
        let resolver = RuleResolver::builtin();
        assert_eq!(resolver.resolve("https://xkcd.com/1234/"), "add_image_title");
        assert_eq!(resolver.resolve("https://what-if.XKCD.com/1/"), "add_image_title");
        assert_eq!(resolver.resolve("https://www.youtube.com/watch?v=abc"), "add_youtube_video");
        assert_eq!(
            resolver.resolve("https://www.balipost.com/news/2020/01/01/1/x.html"),
            "cleanup_balipost,add_dynamic_image"
        );
    }

    #[test]
    fn test_resolve_no_match() {
        let resolver = RuleResolver::builtin();
        assert_eq!(resolver.resolve("http://example.com/a"), "");
        assert_eq!(resolver.resolve(""), "");
    }

    #[test]
    fn test_resolve_matches_domain_not_path() {
        let resolver = RuleResolver::builtin();
        assert_eq!(resolver.resolve("http://example.com/xkcd.com/comic"), "");
    }

    #[test]
    fn test_first_match_wins() {
        let config = ConfigManager::custom()
            .domain_rule("xkcd", "hide_first_image")
            .domain_rule("xkcd.com", "add_dynamic_image")
            .build();
        let resolver = RuleResolver::from_config(&config);

        assert_eq!(resolver.resolve("https://xkcd.com/1/"), "hide_first_image");
        assert_eq!(resolver.mappings()[0].domain, "xkcd");
        assert_eq!(resolver.mappings().len(), PREDEFINED_RULES.len() + 2);
    }

    #[test]
    fn test_blank_configured_domain_is_ignored() {
        let config = ConfigManager::custom()
            .domain_rule("  ", "hide_first_image")
            .domain_rule("", "add_dynamic_image")
            .build();
        let resolver = RuleResolver::from_config(&config);

        assert_eq!(resolver.mappings().len(), PREDEFINED_RULES.len());
        assert_eq!(resolver.resolve("http://example.com/a"), "");
        assert_eq!(resolver.resolve("https://xkcd.com/1/"), "add_image_title");
    }

    #[test]
    fn test_domain_of_unparsable_url() {
        assert_eq!(RuleResolver::domain_of("not a url"), "not a url");
        assert_eq!(RuleResolver::domain_of("HTTPS://Example.COM:8080/x"), "example.com");
    }
}
