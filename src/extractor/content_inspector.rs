//! HTML内容探查器
//! 基于 html5ever 分词器做一次只读扫描，统计改写规则关心的标签特征，
//! 供各规则在真正改写前快速判断「是否需要动手」

use std::cell::RefCell;
use std::collections::BTreeSet;

use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use markup5ever::interface::Attribute;
use tendril::StrTendril;

use crate::rewriter::rules::pdf_link::BLOCK_MARKER_ATTR;
use crate::utils::is_pdf_url;

/// 扫描结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContentProfile {
    /// `<img>` 总数
    pub image_count: usize,
    /// 同时带 src 与非空 title 的 `<img>` 数量
    pub titled_image_count: usize,
    /// 带 `data-*` 属性的 `<img>` / `<div>` 数量（懒加载候选）
    pub data_attr_element_count: usize,
    /// `<noscript>` 数量
    pub noscript_count: usize,
    /// 所有元素出现过的 class（已转小写）
    pub class_tokens: BTreeSet<String>,
    /// 内嵌PDF的地址（embed/object/iframe）
    pub pdf_sources: Vec<String>,
    /// 是否已有本库注入的PDF下载块
    pub has_pdf_block: bool,
}

impl ContentProfile {
    pub fn has_class(&self, class: &str) -> bool {
        self.class_tokens.contains(class)
    }
}

#[derive(Debug, Default)]
pub struct ContentInspector {
    profile: RefCell<ContentProfile>,
}

impl TokenSink for ContentInspector {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(Tag {
            kind: TagKind::StartTag,
            name,
            attrs,
            ..
        }) = token
        {
            self.collect_classes(&attrs);
            if find_attr(&attrs, BLOCK_MARKER_ATTR).is_some() {
                self.profile.borrow_mut().has_pdf_block = true;
            }
            match name.as_ref() {
                "img" => self.inspect_image(&attrs),
                "div" => {
                    if has_data_attribute(&attrs) {
                        self.profile.borrow_mut().data_attr_element_count += 1;
                    }
                }
                "noscript" => self.profile.borrow_mut().noscript_count += 1,
                "embed" | "iframe" => self.inspect_embedded(&attrs, "src"),
                "object" => self.inspect_embedded(&attrs, "data"),
                _ => {}
            }
        }
        TokenSinkResult::Continue
    }
}

impl ContentInspector {
    /// 扫描HTML片段；畸形HTML由分词器容错处理，不会失败
    pub fn inspect(html: &str) -> ContentProfile {
        let tokenizer = Tokenizer::new(ContentInspector::default(), TokenizerOpts::default());
        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(html));

        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        tokenizer.sink.profile.into_inner()
    }

    fn inspect_image(&self, attrs: &[Attribute]) {
        let mut profile = self.profile.borrow_mut();
        profile.image_count += 1;

        let has_src = find_attr(attrs, "src").is_some();
        let has_title = find_attr(attrs, "title").is_some_and(|t| !t.trim().is_empty());
        if has_src && has_title {
            profile.titled_image_count += 1;
        }
        if has_data_attribute(attrs) {
            profile.data_attr_element_count += 1;
        }
    }

    fn inspect_embedded(&self, attrs: &[Attribute], source_attr: &str) {
        let Some(source) = find_attr(attrs, source_attr) else {
            return;
        };
        let is_pdf_type = find_attr(attrs, "type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/pdf"));

        if is_pdf_type || is_pdf_url(source) {
            self.profile.borrow_mut().pdf_sources.push(source.trim().to_string());
        }
    }

    fn collect_classes(&self, attrs: &[Attribute]) {
        if let Some(class) = find_attr(attrs, "class") {
            let mut profile = self.profile.borrow_mut();
            for token in class.split_ascii_whitespace() {
                profile.class_tokens.insert(token.to_ascii_lowercase());
            }
        }
    }
}

fn find_attr<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|attr| attr.name.local.as_ref() == name)
        .map(|attr| &*attr.value)
}

fn has_data_attribute(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| attr.name.local.as_ref().starts_with("data-"))
}
