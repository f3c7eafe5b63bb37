// ==========================================
// 賃貸管理システム - 参照完整性检查器
// ==========================================
// 纯函数: 只看传入的 (物件, 入居者) 集合，不关心来源
//         （导入候选集与规范存储共用同一检查）
// 规则: FK 规则与容量规则都穷举评估，不短路
// ==========================================

use crate::domain::property::Property;
use crate::domain::tenant::Tenant;
use crate::domain::types::IntegrityKind;
use serde::{Deserialize, Serialize};

// ==========================================
// IntegrityError / IntegrityReport
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityError {
    pub kind: IntegrityKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub valid: bool,
    pub errors: Vec<IntegrityError>,
}

// ==========================================
// IntegrityChecker - 参照完整性检查器
// ==========================================
pub struct IntegrityChecker;

impl IntegrityChecker {
    pub fn new() -> Self {
        Self
    }

    /// 检查实体集（社員不在此检查范围内）
    ///
    /// 规则 1 (FK): 每个入居者的 property_id 必须在同一集合内可解析，
    ///             每名违规入居者产出一条错误（含入居者名与缺失 id）
    /// 规则 2 (容量): 每个物件统计 status=active 且归属匹配的入居者数，
    ///               超过 capacity 时产出一条错误（含 计数/容量 对）
    ///
    /// valid = 两类规则均零错误
    pub fn check(&self, properties: &[Property], tenants: &[Tenant]) -> IntegrityReport {
        let mut errors = Vec::new();

        // === 规则 1: FK ===
        for tenant in tenants {
            if !properties.iter().any(|p| p.id == tenant.property_id) {
                errors.push(IntegrityError {
                    kind: IntegrityKind::FkError,
                    message: format!(
                        "入居者「{}」关联的物件不存在: property_id={}",
                        display_tenant_name(tenant),
                        tenant.property_id
                    ),
                });
            }
        }

        // === 规则 2: 容量 ===
        for property in properties {
            let active_count = tenants
                .iter()
                .filter(|t| t.is_active() && t.property_id == property.id)
                .count() as i64;
            if active_count > property.capacity {
                errors.push(IntegrityError {
                    kind: IntegrityKind::CapacityError,
                    message: format!(
                        "物件「{}」入居超员: {}/{}",
                        property.name, active_count, property.capacity
                    ),
                });
            }
        }

        IntegrityReport {
            valid: errors.is_empty(),
            errors,
        }
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}

// 错误消息里的入居者标识: 氏名优先，退化到カナ
fn display_tenant_name(tenant: &Tenant) -> &str {
    if tenant.name.is_empty() {
        &tenant.kana
    } else {
        &tenant.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TenantStatus;

    fn property(id: i64, name: &str, capacity: i64) -> Property {
        Property {
            id,
            name: name.to_string(),
            address: String::new(),
            postal_code: String::new(),
            phone: String::new(),
            unit_type: String::new(),
            capacity,
            rent_cost: 0,
            rent_price_uns: 0,
            parking_cost: 0,
            contract_start: None,
            contract_end: None,
        }
    }

    fn tenant(id: i64, property_id: i64, status: TenantStatus) -> Tenant {
        Tenant {
            id,
            employee_id: String::new(),
            name: format!("入居者{}", id),
            kana: "カナ".to_string(),
            property_id,
            rent_contribution: 0,
            parking_fee: 0,
            entry_date: None,
            status,
        }
    }

    #[test]
    fn test_valid_set_reports_no_errors() {
        let properties = vec![property(1, "Sakura", 2)];
        let tenants = vec![
            tenant(1, 1, TenantStatus::Active),
            tenant(2, 1, TenantStatus::Active),
        ];

        let report = IntegrityChecker::new().check(&properties, &tenants);
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_fk_violation_one_error_per_tenant() {
        let properties = vec![property(1, "Sakura", 2)];
        let tenants = vec![
            tenant(1, 99, TenantStatus::Active),
            tenant(2, 98, TenantStatus::Inactive),
        ];

        let report = IntegrityChecker::new().check(&properties, &tenants);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert!(report
            .errors
            .iter()
            .all(|e| e.kind == IntegrityKind::FkError));
        assert!(report.errors[0].message.contains("入居者1"));
        assert!(report.errors[0].message.contains("99"));
    }

    #[test]
    fn test_capacity_violation_names_count_pair() {
        // 容量 1 配 2 名在住入居者 → 一条 CAPACITY_ERROR，含 "2/1"
        let properties = vec![property(1, "Sakura", 1)];
        let tenants = vec![
            tenant(1, 1, TenantStatus::Active),
            tenant(2, 1, TenantStatus::Active),
        ];

        let report = IntegrityChecker::new().check(&properties, &tenants);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, IntegrityKind::CapacityError);
        assert!(report.errors[0].message.contains("Sakura"));
        assert!(report.errors[0].message.contains("2/1"));
    }

    #[test]
    fn test_inactive_tenants_do_not_count_toward_capacity() {
        let properties = vec![property(1, "Sakura", 1)];
        let tenants = vec![
            tenant(1, 1, TenantStatus::Active),
            tenant(2, 1, TenantStatus::Inactive),
        ];

        let report = IntegrityChecker::new().check(&properties, &tenants);
        assert!(report.valid);
    }

    #[test]
    fn test_both_rule_classes_evaluated_exhaustively() {
        // FK 违规不短路容量规则
        let properties = vec![property(1, "Sakura", 1)];
        let tenants = vec![
            tenant(1, 1, TenantStatus::Active),
            tenant(2, 1, TenantStatus::Active),
            tenant(3, 99, TenantStatus::Active),
        ];

        let report = IntegrityChecker::new().check(&properties, &tenants);
        assert_eq!(report.errors.len(), 2);
        assert!(report
            .errors
            .iter()
            .any(|e| e.kind == IntegrityKind::FkError));
        assert!(report
            .errors
            .iter()
            .any(|e| e.kind == IntegrityKind::CapacityError));
    }

    #[test]
    fn test_checker_is_idempotent() {
        let properties = vec![property(1, "Sakura", 1)];
        let tenants = vec![
            tenant(1, 1, TenantStatus::Active),
            tenant(2, 1, TenantStatus::Active),
        ];

        let checker = IntegrityChecker::new();
        let first = checker.check(&properties, &tenants);
        let second = checker.check(&properties, &tenants);
        assert_eq!(first.errors, second.errors);
        assert_eq!(first.valid, second.valid);
    }
}
