// ==========================================
// 賃貸管理システム - 领域层
// ==========================================
// 职责: 实体、聚合根与全局类型，不含业务流程
// ==========================================

pub mod config;
pub mod database;
pub mod employee;
pub mod import;
pub mod property;
pub mod tenant;
pub mod types;

// 重导出核心类型
pub use config::{is_valid_closing_day, SystemConfig, CLOSING_DAYS};
pub use database::Database;
pub use employee::Employee;
pub use import::{ImportOutcome, RowError};
pub use property::{parse_contract_date, DateParse, Property};
pub use tenant::Tenant;
pub use types::{AlertSeverity, AlertType, ImportKind, IntegrityKind, TenantStatus};
