//! 工具模块：输入守卫、日志预览、HTML转义等通用能力
pub mod input_guard;
pub mod markup;
pub mod preview;

pub use self::input_guard::HtmlInputGuard;
pub use self::markup::{escape_html, is_pdf_url};
pub use self::preview::{preview_compact, ContentPreview};
