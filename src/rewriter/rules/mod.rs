//! 内置规则库：每条规则都是独立的纯函数 (条目URL, 内容) -> 内容
pub mod dynamic_image;
pub mod first_image;
pub mod image_title;
pub mod pdf_link;
pub mod site_cleanup;
pub mod youtube_video;

use std::borrow::Cow;

use lol_html::{ElementContentHandlers, HtmlRewriter, Selector, Settings};

use super::registry::RuleRegistry;
use crate::error::{RewriterError, RwResult};

/// 注册全部内置规则
pub fn register_builtin_rules(registry: &mut RuleRegistry) {
    registry.register(image_title::NAME, image_title::apply);
    registry.register(dynamic_image::NAME, dynamic_image::apply);
    registry.register(youtube_video::NAME, youtube_video::apply);
    registry.register(pdf_link::NAME, pdf_link::apply);
    registry.register(first_image::NAME, first_image::apply);

    for cleanup in site_cleanup::SITE_CLEANUPS {
        registry.register(cleanup.name, move |_, content: &str| cleanup.apply(content));
    }
}

/// 以非严格模式执行 lol_html 改写（兼容畸形HTML/大小写标签/残缺标签）
pub(crate) fn rewrite_html<'h>(
    content: &str,
    element_content_handlers: Vec<(Cow<'_, Selector>, ElementContentHandlers<'h>)>,
) -> RwResult<String> {
    let mut output = Vec::with_capacity(content.len() + 128);

    let settings = Settings {
        strict: false,
        element_content_handlers,
        ..Settings::default()
    };
    let mut rewriter = HtmlRewriter::new(settings, |chunk: &[u8]| output.extend_from_slice(chunk));
    rewriter.write(content.as_bytes())?;
    rewriter.end()?;

    String::from_utf8(output)
        .map_err(|e| RewriterError::InvalidInput(format!("改写输出不是合法UTF-8：{}", e)))
}
