//! 日志中的内容预览：折叠空白、去掉首尾空白、按字符数截断

use std::fmt::{self, Write};

/// 条目内容的日志预览，格式化时才遍历，不复制原文
#[derive(Debug, Clone, Copy)]
pub struct ContentPreview<'a> {
    content: &'a str,
    max_chars: usize,
}

/// 截断时在末尾标注剩余的字节数，便于判断原文规模
pub fn preview_compact(content: &str, max_chars: usize) -> ContentPreview<'_> {
    ContentPreview {
        content: content.trim(),
        max_chars,
    }
}

impl fmt::Display for ContentPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut written = 0;
        let mut pending_space = false;

        for (offset, ch) in self.content.char_indices() {
            if ch.is_whitespace() {
                pending_space = true;
                continue;
            }

            let needed = if pending_space { 2 } else { 1 };
            if written + needed > self.max_chars {
                return write!(f, "…(+{}B)", self.content.len() - offset);
            }
            if pending_space {
                f.write_char(' ')?;
                pending_space = false;
            }
            f.write_char(ch)?;
            written += needed;
        }
        Ok(())
    }
}
