//! 存储边界：分类实体的增删改查与变更同步事件
//! 改写核心不依赖本模块；这里提供接口约定与一个内存实现

pub mod category;
pub mod model;
pub mod sync;

use std::time::Instant;

use tracing::debug;

pub use self::category::{CategoryStore, MemoryCategoryStore};
pub use self::model::Category;
pub use self::sync::{BroadcastPublisher, EntityKind, EntityOp, NoopPublisher, SyncEvent, SyncPublisher};

/// 作用域结束时输出耗时
pub(crate) struct ExecutionTimer {
    label: String,
    start: Instant,
}

impl ExecutionTimer {
    pub(crate) fn new(label: String) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for ExecutionTimer {
    fn drop(&mut self) {
        debug!("{} 耗时{:?}", self.label, self.start.elapsed());
    }
}
