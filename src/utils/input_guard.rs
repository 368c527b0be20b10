/// HTML 输入守卫：负责在进入 HTML 改写前
/// 保证输入「不会拖垮引擎」，超长内容直接拒绝而不是截断（截断会破坏条目内容）
use crate::error::{RewriterError, RwResult};

pub struct HtmlInputGuard;

impl HtmlInputGuard {
    /// 最大 HTML 长度（2MB）
    pub const MAX_HTML_LEN: usize = 2 * 1024 * 1024;

    #[inline(always)]
    pub fn guard(html: &str, max_len: usize) -> RwResult<&str> {
        if html.len() > max_len {
            return Err(RewriterError::ContentTooLarge {
                len: html.len(),
                max: max_len,
            });
        }
        Ok(html)
    }

}
