//! add_dynamic_image：把懒加载图片改写成可直接加载的普通图片

use std::cell::Cell;

use lol_html::element;
use lol_html::html_content::{ContentType, Element};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::rewrite_html;
use crate::error::RwResult;
use crate::extractor::ContentInspector;
use crate::utils::escape_html;

pub const NAME: &str = "add_dynamic_image";

/// 懒加载地址属性，按优先级从高到低排列
const CANDIDATE_ATTRS: [&str; 13] = [
    "data-src",
    "data-original",
    "data-orig",
    "data-url",
    "data-orig-file",
    "data-large-file",
    "data-medium-file",
    "data-2000src",
    "data-1000src",
    "data-800src",
    "data-655src",
    "data-500src",
    "data-380src",
];

static NOSCRIPT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<noscript[^>]*>(.*?)</noscript>").expect("NOSCRIPT_REGEX should compile"));
static IMG_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("IMG_TAG_REGEX should compile"));

pub fn apply(_entry_url: &str, content: &str) -> RwResult<String> {
    let profile = ContentInspector::inspect(content);
    if profile.data_attr_element_count == 0 && profile.noscript_count == 0 {
        return Ok(content.to_string());
    }

    if profile.data_attr_element_count > 0 {
        let changed = Cell::new(false);
        let output = rewrite_html(
            content,
            vec![
                element!("img", |el| {
                    if let Some(src) = lazy_source(el) {
                        el.set_attribute("src", &src)?;
                        changed.set(true);
                    }
                    Ok(())
                }),
                element!("div", |el| {
                    if let Some(src) = lazy_source(el) {
                        let alt = el.get_attribute("alt").unwrap_or_default();
                        let img = format!(r#"<img src="{}" alt="{}"/>"#, escape_html(&src), escape_html(&alt));
                        el.replace(&img, ContentType::Html);
                        changed.set(true);
                    }
                    Ok(())
                }),
            ],
        )?;

        if changed.get() {
            return Ok(output);
        }
    }

    Ok(unwrap_noscript_images(content))
}

/// 第一个非空的懒加载地址
fn lazy_source(el: &Element<'_, '_>) -> Option<String> {
    CANDIDATE_ATTRS
        .iter()
        .find_map(|attr| el.get_attribute(attr).filter(|value| !value.trim().is_empty()))
}

/// 只包含一张图片的 `<noscript>` 用这张图片替换
fn unwrap_noscript_images(content: &str) -> String {
    NOSCRIPT_REGEX
        .replace_all(content, |caps: &Captures| {
            let mut images = IMG_TAG_REGEX.find_iter(&caps[1]).take(2);
            match (images.next(), images.next()) {
                (Some(img), None) => img.as_str().to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}
