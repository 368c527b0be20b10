//! 分类存储：接口约定 + 线程安全的内存实现
//! 约束与关系型存储一致：同一用户下标题唯一，列表按标题升序

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::model::Category;
use super::sync::{EntityOp, NoopPublisher, SyncEvent, SyncPublisher};
use super::ExecutionTimer;
use crate::error::{RewriterError, RwResult};

/// 分类存储接口
/// 未找到返回 `Ok(None)`；约束冲突返回 `StorageIntegrity`；删除零行返回 `NothingRemoved`
pub trait CategoryStore: Send + Sync {
    /// 同一用户下是否存在另一个（id 不同）同名分类
    fn another_category_exists(&self, user_id: i64, category_id: i64, title: &str) -> bool;

    fn category_exists(&self, user_id: i64, category_id: i64) -> bool;

    fn category(&self, user_id: i64, category_id: i64) -> RwResult<Option<Category>>;

    /// 按标题排序后的第一个分类
    fn first_category(&self, user_id: i64) -> RwResult<Option<Category>>;

    fn category_by_title(&self, user_id: i64, title: &str) -> RwResult<Option<Category>>;

    fn categories(&self, user_id: i64) -> RwResult<Vec<Category>>;

    /// 同 `categories`，并填充 `feed_count`
    fn categories_with_feed_count(&self, user_id: i64) -> RwResult<Vec<Category>>;

    /// 创建成功后回写分配的 id
    fn create_category(&self, category: &mut Category) -> RwResult<()>;

    fn update_category(&self, category: &Category) -> RwResult<()>;

    fn remove_category(&self, user_id: i64, category_id: i64) -> RwResult<()>;
}

#[derive(Debug, Default)]
struct StoreState {
    next_id: i64,
    rows: BTreeMap<i64, Category>,
    feed_counts: HashMap<i64, i64>,
}

impl StoreState {
    fn title_taken(&self, user_id: i64, title: &str, except_id: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|c| c.user_id == user_id && c.title == title && Some(c.id) != except_id)
    }

    fn sorted_for_user(&self, user_id: i64) -> Vec<Category> {
        let mut list: Vec<Category> = self
            .rows
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        list
    }
}

/// 内存分类存储，每次成功写入后发布同步事件
#[derive(Debug, Default)]
pub struct MemoryCategoryStore<P: SyncPublisher = NoopPublisher> {
    state: RwLock<StoreState>,
    publisher: P,
}

impl MemoryCategoryStore<NoopPublisher> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: SyncPublisher> MemoryCategoryStore<P> {
    pub fn with_publisher(publisher: P) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            publisher,
        }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// 订阅源归属由订阅源存储维护，这里只记录计数
    pub fn set_feed_count(&self, category_id: i64, count: i64) {
        self.write().feed_counts.insert(category_id, count);
    }

    // 锁中毒时沿用内部数据，读写操作都不会留下半完成状态
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn validate_title(category: &Category) -> RwResult<()> {
        if category.title.trim().is_empty() {
            return Err(RewriterError::StorageIntegrity(format!(
                "用户 {} 的分类标题不能为空",
                category.user_id
            )));
        }
        Ok(())
    }
}

impl<P: SyncPublisher> CategoryStore for MemoryCategoryStore<P> {
    fn another_category_exists(&self, user_id: i64, category_id: i64, title: &str) -> bool {
        self.read().title_taken(user_id, title, Some(category_id))
    }

    fn category_exists(&self, user_id: i64, category_id: i64) -> bool {
        self.read()
            .rows
            .get(&category_id)
            .is_some_and(|c| c.user_id == user_id)
    }

    fn category(&self, user_id: i64, category_id: i64) -> RwResult<Option<Category>> {
        let _timer = ExecutionTimer::new(format!("[category] userID={user_id}, categoryID={category_id}"));
        Ok(self
            .read()
            .rows
            .get(&category_id)
            .filter(|c| c.user_id == user_id)
            .cloned())
    }

    fn first_category(&self, user_id: i64) -> RwResult<Option<Category>> {
        let _timer = ExecutionTimer::new(format!("[first_category] userID={user_id}"));
        Ok(self.read().sorted_for_user(user_id).into_iter().next())
    }

    fn category_by_title(&self, user_id: i64, title: &str) -> RwResult<Option<Category>> {
        let _timer = ExecutionTimer::new(format!("[category_by_title] userID={user_id}, title={title}"));
        Ok(self
            .read()
            .rows
            .values()
            .find(|c| c.user_id == user_id && c.title == title)
            .cloned())
    }

    fn categories(&self, user_id: i64) -> RwResult<Vec<Category>> {
        let _timer = ExecutionTimer::new(format!("[categories] userID={user_id}"));
        Ok(self.read().sorted_for_user(user_id))
    }

    fn categories_with_feed_count(&self, user_id: i64) -> RwResult<Vec<Category>> {
        let _timer = ExecutionTimer::new(format!("[categories_with_feed_count] userID={user_id}"));
        let state = self.read();
        let mut list = state.sorted_for_user(user_id);
        for category in &mut list {
            category.feed_count = Some(state.feed_counts.get(&category.id).copied().unwrap_or(0));
        }
        Ok(list)
    }

    fn create_category(&self, category: &mut Category) -> RwResult<()> {
        Self::validate_title(category)?;
        {
            let mut state = self.write();
            if state.title_taken(category.user_id, &category.title, None) {
                return Err(RewriterError::StorageIntegrity(format!(
                    "用户 {} 已存在分类「{}」",
                    category.user_id, category.title
                )));
            }
            state.next_id += 1;
            category.id = state.next_id;
            category.feed_count = None;
            state.rows.insert(category.id, category.clone());
        }

        debug!("创建分类：{}", category);
        self.publisher
            .publish(SyncEvent::category(category.id, EntityOp::Write));
        Ok(())
    }

    fn update_category(&self, category: &Category) -> RwResult<()> {
        Self::validate_title(category)?;
        {
            let mut state = self.write();
            if state.title_taken(category.user_id, &category.title, Some(category.id)) {
                return Err(RewriterError::StorageIntegrity(format!(
                    "用户 {} 已存在分类「{}」",
                    category.user_id, category.title
                )));
            }
            // 不属于该用户的行不更新，与 `WHERE id AND user_id` 语义一致
            if let Some(row) = state
                .rows
                .get_mut(&category.id)
                .filter(|row| row.user_id == category.user_id)
            {
                row.title = category.title.clone();
            }
        }

        self.publisher
            .publish(SyncEvent::category(category.id, EntityOp::Write));
        Ok(())
    }

    fn remove_category(&self, user_id: i64, category_id: i64) -> RwResult<()> {
        {
            let mut state = self.write();
            let owned = state
                .rows
                .get(&category_id)
                .is_some_and(|c| c.user_id == user_id);
            if !owned {
                return Err(RewriterError::NothingRemoved(format!(
                    "用户 {user_id} 的分类 {category_id}"
                )));
            }
            state.rows.remove(&category_id);
            state.feed_counts.remove(&category_id);
        }

        debug!("删除分类：userID={}, categoryID={}", user_id, category_id);
        self.publisher
            .publish(SyncEvent::category(category_id, EntityOp::Delete));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sync::BroadcastPublisher;

    fn seeded() -> MemoryCategoryStore {
        let store = MemoryCategoryStore::new();
        for title in ["News", "Comics", "Tech"] {
            store.create_category(&mut Category::new(1, title)).unwrap();
        }
        store.create_category(&mut Category::new(2, "News")).unwrap();
        store
    }

    #[test]
    fn test_create_assigns_ids() {
        let store = MemoryCategoryStore::new();
        let mut first = Category::new(1, "A");
        let mut second = Category::new(1, "B");
        store.create_category(&mut first).unwrap();
        store.create_category(&mut second).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(store.category_exists(1, 2));
        assert!(!store.category_exists(2, 2));
    }

    #[test]
    fn test_unique_title_per_user() {
        let store = seeded();
        let err = store.create_category(&mut Category::new(1, "News")).unwrap_err();
        assert!(matches!(err, RewriterError::StorageIntegrity(_)));
        assert!(store.create_category(&mut Category::new(3, "News")).is_ok());
        assert!(matches!(
            store.create_category(&mut Category::new(1, "  ")),
            Err(RewriterError::StorageIntegrity(_))
        ));
    }

    #[test]
    fn test_listing_is_ordered_by_title() {
        let store = seeded();
        let titles: Vec<String> = store.categories(1).unwrap().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Comics", "News", "Tech"]);
        assert_eq!(store.first_category(1).unwrap().unwrap().title, "Comics");
        assert!(store.first_category(99).unwrap().is_none());
    }

    #[test]
    fn test_not_found_is_none() {
        let store = seeded();
        assert!(store.category(1, 42).unwrap().is_none());
        // 其他用户的分类不可见
        let other = store.category_by_title(2, "News").unwrap().unwrap();
        assert!(store.category(1, other.id).unwrap().is_none());
        assert!(store.category_by_title(1, "Missing").unwrap().is_none());
    }

    #[test]
    fn test_another_category_exists() {
        let store = seeded();
        let news = store.category_by_title(1, "News").unwrap().unwrap();
        assert!(!store.another_category_exists(1, news.id, "News"));
        assert!(store.another_category_exists(1, news.id, "Tech"));
    }

    #[test]
    fn test_update_respects_uniqueness() {
        let store = seeded();
        let mut tech = store.category_by_title(1, "Tech").unwrap().unwrap();
        tech.title = "News".to_string();
        assert!(matches!(
            store.update_category(&tech),
            Err(RewriterError::StorageIntegrity(_))
        ));

        tech.title = "Science".to_string();
        store.update_category(&tech).unwrap();
        assert_eq!(store.category(1, tech.id).unwrap().unwrap().title, "Science");
    }

    #[test]
    fn test_remove_and_nothing_removed() {
        let store = seeded();
        let comics = store.category_by_title(1, "Comics").unwrap().unwrap();
        store.remove_category(1, comics.id).unwrap();
        assert!(!store.category_exists(1, comics.id));
        assert!(matches!(
            store.remove_category(1, comics.id),
            Err(RewriterError::NothingRemoved(_))
        ));
    }

    #[test]
    fn test_feed_counts() {
        let store = seeded();
        let news = store.category_by_title(1, "News").unwrap().unwrap();
        store.set_feed_count(news.id, 5);

        let list = store.categories_with_feed_count(1).unwrap();
        let counts: Vec<(String, Option<i64>)> = list.into_iter().map(|c| (c.title, c.feed_count)).collect();
        assert_eq!(
            counts,
            vec![
                ("Comics".to_string(), Some(0)),
                ("News".to_string(), Some(5)),
                ("Tech".to_string(), Some(0)),
            ]
        );
        assert!(store.categories(1).unwrap().iter().all(|c| c.feed_count.is_none()));
    }

    #[tokio::test]
    async fn test_writes_publish_sync_events() {
        let store = MemoryCategoryStore::with_publisher(BroadcastPublisher::new(8));
        let mut rx = store.publisher().subscribe();

        let mut category = Category::new(1, "Local");
        store.create_category(&mut category).unwrap();
        category.title = "Local news".to_string();
        store.update_category(&category).unwrap();
        store.remove_category(1, category.id).unwrap();

        assert_eq!(rx.recv().await.unwrap(), SyncEvent::category(category.id, EntityOp::Write));
        assert_eq!(rx.recv().await.unwrap(), SyncEvent::category(category.id, EntityOp::Write));
        assert_eq!(rx.recv().await.unwrap(), SyncEvent::category(category.id, EntityOp::Delete));
    }

    #[tokio::test]
    async fn test_failed_write_publishes_nothing() {
        let store = MemoryCategoryStore::with_publisher(BroadcastPublisher::new(8));
        let mut rx = store.publisher().subscribe();

        assert!(store.remove_category(1, 1).is_err());
        assert!(matches!(
            rx.try_recv(),
            Err(tokio::sync::broadcast::error::TryRecvError::Empty)
        ));
    }
}
