// ==========================================
// 賃貸管理システム - 入居者领域模型
// ==========================================
// 归属: 每个入居者经 property_id 归属唯一物件（FK）
// 级联: 物件删除时其入居者一并删除
// ==========================================

use crate::domain::types::TenantStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    // ===== 主键 =====
    pub id: i64,

    // ===== 外部引用（非本库 FK，指向社員名簿编码） =====
    pub employee_id: String,

    // ===== 基础信息 =====
    pub name: String,
    pub kana: String, // カナ（必填）

    // ===== 归属物件（FK → Property.id） =====
    pub property_id: i64,

    // ===== 金额（円，整数，>= 0） =====
    pub rent_contribution: i64, // 家賃分担额
    pub parking_fee: i64,       // 駐車場代

    // ===== 入居情报 =====
    pub entry_date: Option<NaiveDate>, // 入居日
    pub status: TenantStatus,
}

impl Tenant {
    /// 是否在住
    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }
}
