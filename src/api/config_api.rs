// ==========================================
// 賃貸管理システム - 配置 API
// ==========================================
// 职责: 系统配置更新（締め日白名单校验）
// ==========================================

use crate::api::error::MutationOutcome;
use crate::domain::config::{is_valid_closing_day, SystemConfig, CLOSING_DAYS};
use crate::domain::database::Database;

pub struct ConfigApi;

impl ConfigApi {
    pub fn new() -> Self {
        Self
    }

    /// 更新系统配置
    ///
    /// closing_day 限定 {0, 15, 20, 25}，0 = 月末締め
    pub fn update_config(&self, db: &mut Database, config: SystemConfig) -> MutationOutcome {
        if !is_valid_closing_day(config.closing_day) {
            return MutationOutcome::failed_with(format!(
                "締め日无效: {}（允许值: {:?}）",
                config.closing_day, CLOSING_DAYS
            ));
        }
        db.config = config;
        MutationOutcome::ok()
    }
}

impl Default for ConfigApi {
    fn default() -> Self {
        Self::new()
    }
}
