//! hide_first_image：移除第一张图片（站点把缩略图重复放进正文时使用）

use lol_html::element;

use super::rewrite_html;
use crate::error::RwResult;
use crate::extractor::ContentInspector;

pub const NAME: &str = "hide_first_image";

pub fn apply(_entry_url: &str, content: &str) -> RwResult<String> {
    if ContentInspector::inspect(content).image_count == 0 {
        return Ok(content.to_string());
    }

    let mut removed = false;
    rewrite_html(
        content,
        vec![element!("img", |el| {
            if !removed {
                el.remove();
                removed = true;
            }
            Ok(())
        })],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_only_first_image() {
        let content = r#"<p><img src="thumb.jpg"></p><p>text</p><img src="body.jpg">"#;
        let output = apply("u", content).unwrap();
        assert_eq!(output, r#"<p></p><p>text</p><img src="body.jpg">"#);
    }

    #[test]
    fn test_no_images_unchanged() {
        let content = "<p>no pictures here</p>";
        assert_eq!(apply("u", content).unwrap(), content);
    }
}
