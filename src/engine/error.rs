// ==========================================
// 賃貸管理システム - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("物件不存在: id={0}")]
    PropertyNotFound(i64),

    /// 均等分配对零名在住入居者: 用户可见错误，绝非除零故障
    #[error("没有可分配的在住入居者: property_id={0}")]
    NothingToDistribute(i64),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
