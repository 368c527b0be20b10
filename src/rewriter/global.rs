//! 全局改写器单例管理
use once_cell::sync::OnceCell;
use tracing::debug;

use super::engine::Rewriter;
use crate::config::{ConfigManager, RewriterConfig};
use crate::error::{RewriterError, RwResult};

/// 全局改写器实例
static GLOBAL_REWRITER: OnceCell<Rewriter> = OnceCell::new();

/// 带自定义配置初始化全局改写器；只能在首次使用前调用一次
pub fn init_rewriter(config: RewriterConfig) -> RwResult<()> {
    GLOBAL_REWRITER.set(Rewriter::new(config)).map_err(|_| {
        RewriterError::InvalidInput("全局改写器已初始化，配置未生效".to_string())
    })?;
    debug!("全局改写器初始化完成");
    Ok(())
}

/// 获取全局改写器；未显式初始化时使用默认配置
pub fn global_rewriter() -> &'static Rewriter {
    GLOBAL_REWRITER.get_or_init(|| Rewriter::new(ConfigManager::get_default()))
}

/// 使用全局改写器改写条目内容
pub fn rewrite(entry_url: &str, entry_content: &str, custom_rules: &str) -> String {
    global_rewriter().rewrite(entry_url, entry_content, custom_rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_rewrite() {
        let output = rewrite("http://example.com/doc.pdf", "<p>text</p>", "");
        assert!(output.starts_with("<p>text</p>"));
        assert_eq!(output.matches("pdf-download-link").count(), 1);

        // 已使用过的全局实例不能再次初始化
        assert!(init_rewriter(ConfigManager::get_default()).is_err());
    }

    #[test]
    fn test_global_concurrent_use() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    let content = format!(r#"<img src="{i}.jpg" title="t{i}">"#);
                    rewrite("https://xkcd.com/1/", &content, "")
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let output = handle.join().unwrap();
            assert!(output.contains(&format!("<figcaption><p>t{i}</p></figcaption>")));
        }
    }
}
