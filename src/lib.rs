// ==========================================
// 賃貸管理システム - 核心库
// ==========================================
// 技术栈: Rust + 内存数据库快照
// 系统定位: 租赁台账核心 (导入/校验/合并/分摊/汇总)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 业务规则
pub mod engine;

// API 层 - 业务接口
pub mod api;

// 持久化层 - 快照存取
pub mod store;

// 通知层 - 面向调用方的提示
pub mod notify;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AlertSeverity, AlertType, ImportKind, IntegrityKind, TenantStatus};

// 领域实体
pub use domain::{
    Database, Employee, ImportOutcome, Property, RowError, SystemConfig, Tenant,
};

// 引擎
pub use engine::{
    DashboardSnapshot, DistributionSummary, IntegrityChecker, IntegrityReport, MergeEngine,
    MergeSummary, MetricsAggregator, RentAllocator,
};

// 导入
pub use importer::{
    ExcelWorkbook, ImportError, ImportPipeline, MemoryWorkbook, RawRow, RowValidator,
    WorkbookSource,
};

// API
pub use api::{
    ApiError, ApiResult, ConfigApi, DashboardApi, EmployeeApi, ImportApi, MutationOutcome,
    PropertyApi, TenantApi,
};

// 持久化与通知
pub use notify::{LogNotifier, Notification, Notifier, NotifyLevel};
pub use store::{JsonFileStore, MemoryStore, PersistentStore, StoreError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "賃貸管理システム";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_db_version() {
        assert_eq!(DB_VERSION, "v0.1");
    }
}
