// ==========================================
// 賃貸管理システム - API层错误类型
// ==========================================
// 职责: 跨层错误转换 + CRUD 变更结果外形
// 传播策略: 校验失败绝不作为 Err 抛出，一律折叠进 MutationOutcome；
//           只有工作簿不可用等硬故障才经 ApiError 传播
// ==========================================

use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use crate::importer::row_validator::FieldViolation;
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("导入失败: {0}")]
    ImportFailed(String),

    #[error("存储访问失败: {0}")]
    StoreFailed(String),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportFailed(err.to_string())
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::PropertyNotFound(id) => ApiError::NotFound(format!("物件 id={}", id)),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::StoreFailed(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// MutationOutcome - CRUD 变更结果
// ==========================================
// 外形: {success: true} / {success: false, errors: [...]}，
// 校验失败走此通道而非 Err
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub success: bool,
    pub errors: Vec<String>,
}

impl MutationOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
        }
    }

    pub fn failed_with(message: impl Into<String>) -> Self {
        Self::failed(vec![message.into()])
    }

    pub fn from_violations(violations: Vec<FieldViolation>) -> Self {
        Self::failed(
            violations
                .into_iter()
                .map(|v| format!("{}: {}", v.field, v.message))
                .collect(),
        )
    }
}
