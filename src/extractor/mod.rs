//! 提取模块：改写前对HTML片段做只读扫描
pub mod content_inspector;

pub use self::content_inspector::{ContentInspector, ContentProfile};
