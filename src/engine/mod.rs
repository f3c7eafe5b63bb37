// ==========================================
// 賃貸管理システム - 引擎层
// ==========================================
// 职责: 业务规则（完整性 / 合并 / 分配 / 指标），全部无状态
// ==========================================

pub mod allocation;
pub mod error;
pub mod integrity;
pub mod merge;
pub mod metrics;

// 重导出核心类型
pub use allocation::{DistributionSummary, RentAllocator};
pub use error::{EngineError, EngineResult};
pub use integrity::{IntegrityChecker, IntegrityError, IntegrityReport};
pub use merge::{MergeEngine, MergeSummary};
pub use metrics::{next_closing_date, AlertItem, DashboardSnapshot, MetricsAggregator};
