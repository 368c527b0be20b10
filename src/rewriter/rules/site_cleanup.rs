//! 站点专用清理规则：按出版方稳定的 class 标记移除分享组件、相关文章等模板内容
//! 只移除列出的标记，结构相似的其他页面不受影响

use lol_html::element;

use super::rewrite_html;
use crate::error::RwResult;
use crate::extractor::ContentInspector;

/// 单个出版方的清理配置
#[derive(Debug)]
pub struct SiteCleanup {
    pub name: &'static str,
    pub classes: &'static [&'static str],
}

pub static SITE_CLEANUPS: &[SiteCleanup] = &[
    SiteCleanup {
        name: "cleanup_balipost",
        classes: &[
            "sharedaddy",
            "jp-relatedposts",
            "addtoany_share_save_container",
            "baca-juga",
        ],
    },
    SiteCleanup {
        name: "cleanup_metrobali",
        classes: &[
            "td-post-sharing",
            "td-post-sharing-bottom",
            "td_block_related_posts",
            "td-post-source-tags",
        ],
    },
    SiteCleanup {
        name: "cleanup_balipuspanews",
        classes: &[
            "heateor_sss_sharing_container",
            "crp_related",
            "post-views",
            "jeg_share_button",
        ],
    },
];

impl SiteCleanup {
    /// 按规则名查找
    pub fn find(name: &str) -> Option<&'static SiteCleanup> {
        SITE_CLEANUPS.iter().find(|cleanup| cleanup.name == name)
    }

    pub fn apply(&self, content: &str) -> RwResult<String> {
        let profile = ContentInspector::inspect(content);
        let present: Vec<&str> = self
            .classes
            .iter()
            .copied()
            .filter(|class| profile.has_class(class))
            .collect();
        if present.is_empty() {
            return Ok(content.to_string());
        }

        let handlers = present
            .iter()
            .map(|class| {
                element!(format!(".{class}"), |el| {
                    el.remove();
                    Ok(())
                })
            })
            .collect();
        rewrite_html(content, handlers)
    }
}
