// ==========================================
// 賃貸管理システム - API 层
// ==========================================
// 职责: 面向调用方的 CRUD / 导入 / 仪表盘入口
// 红线: 校验失败一律返回 MutationOutcome，不 panic
// ==========================================

pub mod config_api;
pub mod dashboard_api;
pub mod employee_api;
pub mod error;
pub mod import_api;
pub mod property_api;
pub mod tenant_api;

pub use config_api::ConfigApi;
pub use dashboard_api::DashboardApi;
pub use employee_api::EmployeeApi;
pub use error::{ApiError, ApiResult, MutationOutcome};
pub use import_api::ImportApi;
pub use property_api::PropertyApi;
pub use tenant_api::TenantApi;

use chrono::Utc;

/// 为手工新增的记录铸造 ID：毫秒时间戳起步，冲突则 +1
///
/// 批量导入走 merge 的 max+1 规则，二者互不干扰
pub(crate) fn time_derived_id(is_taken: impl Fn(i64) -> bool) -> i64 {
    let mut id = Utc::now().timestamp_millis();
    while is_taken(id) {
        id += 1;
    }
    id
}
