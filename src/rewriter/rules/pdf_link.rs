//! add_pdf_download_link：条目是PDF文档时追加下载链接
//! 引擎总是把该规则放在最后执行，且可能连续执行两次，因此必须幂等

use url::Url;

use crate::error::RwResult;
use crate::extractor::ContentInspector;
use crate::utils::{escape_html, is_pdf_url};

pub const NAME: &str = "add_pdf_download_link";

/// 下载链接块的 class（供样式使用）
pub const BLOCK_CLASS: &str = "pdf-download-link";

/// 只由本规则写入的标记属性，用于识别已注入的块；页面自带的同名 class 不算
pub const BLOCK_MARKER_ATTR: &str = "data-rsrewriter-pdf";

pub fn apply(entry_url: &str, content: &str) -> RwResult<String> {
    let profile = ContentInspector::inspect(content);
    if profile.has_pdf_block {
        return Ok(content.to_string());
    }

    let href = if is_pdf_url(entry_url) {
        entry_url.trim().to_string()
    } else if let Some(source) = profile.pdf_sources.first() {
        resolve_link(entry_url, source)?
    } else {
        return Ok(content.to_string());
    };

    Ok(format!(
        r#"{content}<div class="{BLOCK_CLASS}" {BLOCK_MARKER_ATTR}><a href="{}">PDF</a></div>"#,
        escape_html(&href)
    ))
}

/// 绝对地址原样使用，相对地址按条目URL补全
fn resolve_link(entry_url: &str, link: &str) -> RwResult<String> {
    if let Ok(absolute) = Url::parse(link) {
        return Ok(absolute.into());
    }
    let base = Url::parse(entry_url.trim())?;
    Ok(base.join(link)?.into())
}
