//! add_youtube_video：条目链接指向 YouTube 视频时注入播放器

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RwResult;

pub const NAME: &str = "add_youtube_video";

static YOUTUBE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:youtube\.com/watch\?(?:[^#]*&)?v=|youtu\.be/)([A-Za-z0-9_-]+)")
        .expect("YOUTUBE_REGEX should compile")
});

/// 从条目URL中提取视频ID
pub fn video_id(entry_url: &str) -> Option<&str> {
    YOUTUBE_REGEX
        .captures(entry_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn apply(entry_url: &str, content: &str) -> RwResult<String> {
    let Some(video_id) = video_id(entry_url) else {
        return Ok(content.to_string());
    };

    let embed_src = format!("https://www.youtube-nocookie.com/embed/{video_id}");
    if content.contains(&embed_src) {
        return Ok(content.to_string());
    }

    Ok(format!(
        r#"<iframe width="650" height="350" frameborder="0" src="{embed_src}" allowfullscreen></iframe><p>{content}</p>"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id() {
        assert_eq!(video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(video_id("https://www.youtube.com/watch?feature=share&v=abc_-1&t=3"), Some("abc_-1"));
        assert_eq!(video_id("https://youtu.be/xyz123"), Some("xyz123"));
        assert_eq!(video_id("https://www.youtube.com/channel/UC123"), None);
        assert_eq!(video_id("https://vimeo.com/123"), None);
    }

    #[test]
    fn test_injects_player() {
        let output = apply("https://www.youtube.com/watch?v=abc", "description").unwrap();
        assert_eq!(
            output,
            r#"<iframe width="650" height="350" frameborder="0" src="https://www.youtube-nocookie.com/embed/abc" allowfullscreen></iframe><p>description</p>"#
        );
    }

    #[test]
    fn test_no_match_unchanged() {
        assert_eq!(apply("https://example.com/watch?v=abc", "x").unwrap(), "x");
    }

    #[test]
    fn test_idempotent() {
        let url = "https://www.youtube.com/watch?v=abc";
        let once = apply(url, "d").unwrap();
        assert_eq!(apply(url, &once).unwrap(), once);
    }
}
