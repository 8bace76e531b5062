// ==========================================
// 库存需求投影看板 - 计算 worker
// ==========================================
// 职责: 在独立线程上执行着色判定与汇总,避免阻塞调用方
// 边界: 异步请求/响应（mpsc 请求 + oneshot 回复）
// 红线: worker 无共享可变状态,每个请求独立
// 红线: 无取消、无超时;worker 被拆除时调用方收到 Unavailable
// ==========================================

use crate::domain::product::ProductRecord;
use crate::domain::summary::ColorSummary;
use crate::domain::types::CellColor;
use crate::engine::aggregator::summarize_all;
use crate::engine::classifier::classify;
use async_trait::async_trait;
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// worker 错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("计算 worker 不可用: {0}")]
    Unavailable(String),

    #[error("计算 worker 启动失败: {0}")]
    SpawnFailed(String),
}

// ==========================================
// CalculationService Trait
// ==========================================
// 实现者: InlineCalculator（调用方线程）/ CalculationWorker（独立线程）
#[async_trait]
pub trait CalculationService: Send + Sync {
    /// 按区间判定颜色
    async fn classify(
        &self,
        total: f64,
        red_zone: f64,
        yellow_zone: f64,
        green_zone: f64,
    ) -> Result<CellColor, WorkerError>;

    /// 汇总全部记录
    async fn summarize(&self, records: Vec<ProductRecord>) -> Result<ColorSummary, WorkerError>;
}

/// 同线程计算（小数据量时使用）
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineCalculator;

#[async_trait]
impl CalculationService for InlineCalculator {
    async fn classify(
        &self,
        total: f64,
        red_zone: f64,
        yellow_zone: f64,
        green_zone: f64,
    ) -> Result<CellColor, WorkerError> {
        Ok(classify(total, red_zone, yellow_zone, green_zone))
    }

    async fn summarize(&self, records: Vec<ProductRecord>) -> Result<ColorSummary, WorkerError> {
        Ok(summarize_all(&records))
    }
}

// ==========================================
// CalculationWorker - 独立线程 worker
// ==========================================

enum CalculationRequest {
    Classify {
        total: f64,
        red_zone: f64,
        yellow_zone: f64,
        green_zone: f64,
        reply: oneshot::Sender<CellColor>,
    },
    Summarize {
        records: Vec<ProductRecord>,
        reply: oneshot::Sender<ColorSummary>,
    },
}

pub struct CalculationWorker {
    tx: mpsc::Sender<CalculationRequest>,
    handle: Option<JoinHandle<()>>,
}

impl CalculationWorker {
    /// 启动 worker 线程
    ///
    /// # 参数
    /// - `queue_capacity`: 请求队列容量（最小为 1）
    pub fn spawn(queue_capacity: usize) -> Result<Self, WorkerError> {
        let (tx, mut rx) = mpsc::channel::<CalculationRequest>(queue_capacity.max(1));

        let handle = thread::Builder::new()
            .name("projection-calc".to_string())
            .spawn(move || {
                tracing::debug!("计算 worker 已启动");
                while let Some(request) = rx.blocking_recv() {
                    process_request(request);
                }
                tracing::debug!("计算 worker 已退出");
            })
            .map_err(|e| WorkerError::SpawnFailed(e.to_string()))?;

        Ok(Self {
            tx,
            handle: Some(handle),
        })
    }

    /// worker 是否仍在接收请求
    pub fn is_alive(&self) -> bool {
        !self.tx.is_closed()
    }

    /// 关闭请求通道并等待线程退出
    pub fn shutdown(mut self) {
        let handle = self.handle.take();
        drop(self);
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::warn!("计算 worker 线程异常退出");
            }
        }
    }

    async fn dispatch<T: Send>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> CalculationRequest + Send,
    ) -> Result<T, WorkerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build(reply_tx))
            .await
            .map_err(|_| WorkerError::Unavailable("请求通道已关闭".to_string()))?;
        reply_rx
            .await
            .map_err(|_| WorkerError::Unavailable("worker 未回复即退出".to_string()))
    }
}

#[async_trait]
impl CalculationService for CalculationWorker {
    async fn classify(
        &self,
        total: f64,
        red_zone: f64,
        yellow_zone: f64,
        green_zone: f64,
    ) -> Result<CellColor, WorkerError> {
        self.dispatch(|reply| CalculationRequest::Classify {
            total,
            red_zone,
            yellow_zone,
            green_zone,
            reply,
        })
        .await
    }

    async fn summarize(&self, records: Vec<ProductRecord>) -> Result<ColorSummary, WorkerError> {
        self.dispatch(|reply| CalculationRequest::Summarize { records, reply })
            .await
    }
}

fn process_request(request: CalculationRequest) {
    // 调用方已放弃等待时回复失败,忽略即可
    match request {
        CalculationRequest::Classify {
            total,
            red_zone,
            yellow_zone,
            green_zone,
            reply,
        } => {
            let _ = reply.send(classify(total, red_zone, yellow_zone, green_zone));
        }
        CalculationRequest::Summarize { records, reply } => {
            let _ = reply.send(summarize_all(&records));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(net_flow: f64) -> ProductRecord {
        ProductRecord {
            reference: "A".to_string(),
            visible_forecasted_date: "2025-03-20T00:00:00".to_string(),
            net_flow,
            red_zone: 10.0,
            yellow_zone: 10.0,
            green_zone: 10.0,
            ..ProductRecord::default()
        }
    }

    #[tokio::test]
    async fn test_worker_classify() {
        let worker = CalculationWorker::spawn(4).unwrap();
        assert_eq!(worker.classify(0.0, 10.0, 10.0, 10.0).await.unwrap(), CellColor::Black);
        assert_eq!(worker.classify(5.0, 10.0, 10.0, 10.0).await.unwrap(), CellColor::Red);
        assert_eq!(worker.classify(15.0, 10.0, 10.0, 10.0).await.unwrap(), CellColor::Yellow);
        assert_eq!(worker.classify(25.0, 10.0, 10.0, 10.0).await.unwrap(), CellColor::Green);
        assert_eq!(worker.classify(31.0, 10.0, 10.0, 10.0).await.unwrap(), CellColor::Blue);
        worker.shutdown();
    }

    #[tokio::test]
    async fn test_worker_matches_inline() {
        let records: Vec<ProductRecord> = [0.0, 5.0, 15.0, 25.0, 50.0, -1.0]
            .into_iter()
            .map(record)
            .collect();

        let worker = CalculationWorker::spawn(1).unwrap();
        let remote = worker.summarize(records.clone()).await.unwrap();
        let local = InlineCalculator.summarize(records).await.unwrap();

        assert_eq!(remote, local);
        assert_eq!(remote.total, 6);
        assert_eq!(remote.blue, 2);
        assert!(worker.is_alive());
    }

    #[tokio::test]
    async fn test_inline_empty_summary() {
        let summary = InlineCalculator.summarize(Vec::new()).await.unwrap();
        assert_eq!(summary, ColorSummary::empty());
    }
}
