// ==========================================
// 库存需求投影看板 - 会话事件发布
// ==========================================
// 职责: 定义会话变更事件与发布 trait
// 说明: 状态持有者发布事件,表现层按需订阅（依赖倒置）
// 红线: 发布失败只记录日志,不影响会话状态
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::mpsc::Sender;
use std::sync::Mutex;

// ==========================================
// 会话事件类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionEventType {
    /// 数据加载（替换会话数据）
    DataLoaded,
    /// 单元格编辑
    CellEdited,
    /// 统计日期变更
    ScopeChanged,
    /// 会话重置
    SessionReset,
}

impl ProjectionEventType {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectionEventType::DataLoaded => "DataLoaded",
            ProjectionEventType::CellEdited => "CellEdited",
            ProjectionEventType::ScopeChanged => "ScopeChanged",
            ProjectionEventType::SessionReset => "SessionReset",
        }
    }
}

/// 会话事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionEvent {
    /// 事件类型
    pub event_type: ProjectionEventType,
    /// 事件发生后的统计日期（None 表示全量）
    pub scope_date: Option<NaiveDate>,
    /// 事件发生后的记录数
    pub record_count: usize,
    /// 被编辑的产品编码（仅 CellEdited）
    pub reference: Option<String>,
}

impl ProjectionEvent {
    pub fn new(
        event_type: ProjectionEventType,
        scope_date: Option<NaiveDate>,
        record_count: usize,
    ) -> Self {
        Self {
            event_type,
            scope_date,
            record_count,
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: &str) -> Self {
        self.reference = Some(reference.to_string());
        self
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 会话事件发布者
pub trait ProjectionEventPublisher: Send + Sync {
    /// 发布会话事件
    fn publish(&self, event: ProjectionEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl ProjectionEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: ProjectionEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::trace!(event_type = event.event_type.as_str(), "跳过事件发布");
        Ok(())
    }
}

/// 基于 mpsc 通道的事件发布者
///
/// 表现层持有 Receiver,在自己的刷新循环里消费事件
pub struct ChannelEventPublisher {
    tx: Mutex<Sender<ProjectionEvent>>,
}

impl ChannelEventPublisher {
    pub fn new(tx: Sender<ProjectionEvent>) -> Self {
        Self { tx: Mutex::new(tx) }
    }
}

impl ProjectionEventPublisher for ChannelEventPublisher {
    fn publish(&self, event: ProjectionEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        let tx = self
            .tx
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e))?;
        tx.send(event).map_err(|e| format!("事件通道已关闭: {}", e))?;
        Ok(())
    }
}
