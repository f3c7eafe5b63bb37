// ==========================================
// 賃貸管理システム - 系统配置
// ==========================================
// closing_day: 締め日，限定 {0, 15, 20, 25}，0 = 月末締め
// ==========================================

use serde::{Deserialize, Serialize};

/// 允许的締め日取值
pub const CLOSING_DAYS: &[u8] = &[0, 15, 20, 25];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    pub company_name: String,
    pub closing_day: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            closing_day: 25,
        }
    }
}

/// 締め日取值校验
pub fn is_valid_closing_day(day: u8) -> bool {
    CLOSING_DAYS.contains(&day)
}
