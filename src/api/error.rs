// ==========================================
// 库存需求投影看板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换引擎/导入错误为用户可读的错误消息
// ==========================================

use crate::engine::worker::WorkerError;
use crate::importer::ImportError;
use serde::Serialize;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 计算 worker 错误
    // ==========================================
    #[error("计算服务不可用: {0}")]
    WorkerUnavailable(String),

    // ==========================================
    // 数据源错误
    // ==========================================
    #[error("导入失败: {0}")]
    ImportError(String),

    #[error("序列化失败: {0}")]
    SerializationError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 稳定的错误码（供前端/脚本分支判断）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::WorkerUnavailable(_) => "WORKER_UNAVAILABLE",
            ApiError::ImportError(_) => "IMPORT_ERROR",
            ApiError::SerializationError(_) => "SERIALIZATION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }

    /// 转为结构化错误响应
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

/// 结构化错误响应
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

// ==========================================
// 从下层错误转换
// ==========================================

impl From<WorkerError> for ApiError {
    fn from(err: WorkerError) -> Self {
        match err {
            WorkerError::Unavailable(msg) | WorkerError::SpawnFailed(msg) => {
                ApiError::WorkerUnavailable(msg)
            }
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}

/// API层Result类型
pub type ApiResult<T> = Result<T, ApiError>;
