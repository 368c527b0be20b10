//! 生成注入片段时使用的最小HTML转义
//! lol_html 读出的属性值保持原始文本（实体未解码），因此不重复转义 `&`

/// 转义可能破坏标签结构的字符
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// 判断链接是否指向PDF文档（忽略查询串、片段与大小写）
pub fn is_pdf_url(link: &str) -> bool {
    let path = link.split(['?', '#']).next().unwrap_or(link);
    path.trim_end().to_ascii_lowercase().ends_with(".pdf")
}
