//! 全局错误类型定义
//! 改写核心对调用方永不报错，这里的错误只在规则内部、配置加载和存储边界上流转

use lol_html::errors::RewritingError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use thiserror::Error;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum RewriterError {
    // 改写相关错误
    #[error("HTML改写失败：{0}")]
    HtmlRewriteError(#[from] RewritingError),
    #[error("规则执行时发生panic：{0}")]
    TransformPanicked(String),
    #[error("内容过大：{len} 字节，上限 {max} 字节")]
    ContentTooLarge { len: usize, max: usize },

    // 配置相关错误
    #[error("配置加载失败：{0}")]
    ConfigLoadError(String),
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 存储相关错误（未找到不是错误，返回 None）
    #[error("存储约束冲突：{0}")]
    StorageIntegrity(String),
    #[error("没有记录被删除：{0}")]
    NothingRemoved(String),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type RwResult<T> = Result<T, RewriterError>;
