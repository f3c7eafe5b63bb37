// ==========================================
// 賃貸管理システム - 基础类型定义
// ==========================================
// 职责: 全局枚举与状态码
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// TenantStatus - 入居者状态
// ==========================================
// active   = 在住（参与容量统计与家賃汇总）
// inactive = 退去（保留记录，不参与统计）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Inactive,
}

impl Default for TenantStatus {
    fn default() -> Self {
        TenantStatus::Active
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenantStatus::Active => write!(f, "active"),
            TenantStatus::Inactive => write!(f, "inactive"),
        }
    }
}

// ==========================================
// ImportKind - 工作簿分类结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportKind {
    /// 社員名簿导入
    EmployeeImport,
    /// 賃貸管理（物件 + 入居者）导入
    RentManagementImport,
    /// 无法识别的工作簿
    Unrecognized,
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportKind::EmployeeImport => write!(f, "EmployeeImport"),
            ImportKind::RentManagementImport => write!(f, "RentManagementImport"),
            ImportKind::Unrecognized => write!(f, "Unrecognized"),
        }
    }
}

// ==========================================
// IntegrityKind - 完整性错误分类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrityKind {
    /// 入居者外键无法解析
    #[serde(rename = "FK_ERROR")]
    FkError,
    /// 物件入居人数超过容量
    #[serde(rename = "CAPACITY_ERROR")]
    CapacityError,
}

impl fmt::Display for IntegrityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityKind::FkError => write!(f, "FK_ERROR"),
            IntegrityKind::CapacityError => write!(f, "CAPACITY_ERROR"),
        }
    }
}

// ==========================================
// AlertType / AlertSeverity - 告警分类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_status_serde_lowercase() {
        let json = serde_json::to_string(&TenantStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");

        let status: TenantStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(status, TenantStatus::Inactive);
    }

    #[test]
    fn test_integrity_kind_wire_format() {
        let json = serde_json::to_string(&IntegrityKind::CapacityError).unwrap();
        assert_eq!(json, "\"CAPACITY_ERROR\"");
        assert_eq!(IntegrityKind::FkError.to_string(), "FK_ERROR");
    }
}
