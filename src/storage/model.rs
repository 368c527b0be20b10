//! 存储数据模型

use std::fmt;

use serde::{Deserialize, Serialize};

/// 分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_count: Option<i64>,
}

impl Category {
    /// 尚未入库的分类（id 由存储分配）
    pub fn new(user_id: i64, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            user_id,
            title: title.into(),
            feed_count: None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.title)
    }
}
