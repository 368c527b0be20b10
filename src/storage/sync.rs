//! 变更同步事件：实体写入/删除后发布，尽力而为，不确认、不回滚

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityOp {
    Write,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncEvent {
    pub entity: EntityKind,
    pub entity_id: i64,
    pub op: EntityOp,
}

impl SyncEvent {
    pub fn category(entity_id: i64, op: EntityOp) -> Self {
        Self {
            entity: EntityKind::Category,
            entity_id,
            op,
        }
    }
}

/// 事件发布者；发布失败只记录日志，不影响调用方
pub trait SyncPublisher: Send + Sync {
    fn publish(&self, event: SyncEvent);
}

/// 丢弃所有事件
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

impl SyncPublisher for NoopPublisher {
    fn publish(&self, _event: SyncEvent) {}
}

/// 基于 tokio broadcast 的进程内发布者，供跨实例缓存/同步的订阅方消费
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    sender: broadcast::Sender<SyncEvent>,
}

impl BroadcastPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.sender.subscribe()
    }
}

impl SyncPublisher for BroadcastPublisher {
    fn publish(&self, event: SyncEvent) {
        // 没有订阅者时发送失败，属于正常情况
        if let Err(e) = self.sender.send(event) {
            debug!("同步事件未投递：{:?}，原因：{}", event, e);
        }
    }
}
