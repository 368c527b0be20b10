//! add_image_title：把图片的 title 变成可见的图注
//! 常见于在 title 里写“彩蛋”文字的漫画站

use lol_html::element;
use lol_html::html_content::ContentType;

use super::rewrite_html;
use crate::error::RwResult;
use crate::extractor::ContentInspector;
use crate::utils::escape_html;

pub const NAME: &str = "add_image_title";

/// `<img title>` 包进 `<figure>`，紧随图片插入 `<figcaption>`；
/// 用过的 title 属性被移除，重复执行不会再次生成图注
pub fn apply(_entry_url: &str, content: &str) -> RwResult<String> {
    if ContentInspector::inspect(content).titled_image_count == 0 {
        return Ok(content.to_string());
    }

    rewrite_html(
        content,
        vec![element!("img[src][title]", |el| {
            let Some(title) = el.get_attribute("title") else {
                return Ok(());
            };
            let title = title.trim();
            if title.is_empty() {
                return Ok(());
            }

            let caption = format!("<figcaption><p>{}</p></figcaption></figure>", escape_html(title));
            el.remove_attribute("title");
            el.before("<figure>", ContentType::Html);
            el.after(&caption, ContentType::Html);
            Ok(())
        })],
    )
}
