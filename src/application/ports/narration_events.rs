//! Narration Events Port - 朗读事件出站端口

use crate::domain::narration::NarrationEvent;

/// 朗读事件发布接口
///
/// 发布失败（如没有订阅者）不影响朗读流程
pub trait NarrationEventsPort: Send + Sync {
    fn publish(&self, event: NarrationEvent);
}
