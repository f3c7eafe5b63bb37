// ==========================================
// 賃貸管理システム - 家賃分配引擎
// ==========================================
// 唯一的再分配算法: 均等分配 + 确定性余数策略
//   base = floor(rent_price_uns / n), remainder = rent_price_uns mod n
//   存储迭代顺序的首名在住入居者承担 base + remainder，其余 base
// 守卫: 零名在住入居者 → 用户可见错误，不动任何记录
// ==========================================

use crate::domain::database::Database;
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

// ==========================================
// DistributionSummary - 分配结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub property_id: i64,
    pub tenant_count: usize,
    pub base_amount: i64,
    pub remainder: i64,
}

// ==========================================
// RentAllocator - 家賃分配引擎
// ==========================================
pub struct RentAllocator;

impl RentAllocator {
    pub fn new() -> Self {
        Self
    }

    /// 将物件的 USN家賃 均等分配给其在住入居者
    ///
    /// 守恒律: sum(分配额) == rent_price_uns，无舍入损失
    #[instrument(skip(self, db))]
    pub fn distribute_evenly(
        &self,
        db: &mut Database,
        property_id: i64,
    ) -> EngineResult<DistributionSummary> {
        let rent_price_uns = db
            .property(property_id)
            .ok_or(EngineError::PropertyNotFound(property_id))?
            .rent_price_uns;

        // 在住入居者索引，保持存储迭代顺序（稳定）
        let indexes: Vec<usize> = db
            .tenants
            .iter()
            .enumerate()
            .filter(|(_, t)| t.property_id == property_id && t.is_active())
            .map(|(i, _)| i)
            .collect();

        let count = indexes.len();
        if count == 0 {
            return Err(EngineError::NothingToDistribute(property_id));
        }

        let base_amount = rent_price_uns / count as i64;
        let remainder = rent_price_uns % count as i64;

        for (position, &index) in indexes.iter().enumerate() {
            db.tenants[index].rent_contribution = if position == 0 {
                base_amount + remainder
            } else {
                base_amount
            };
        }

        info!(
            property_id,
            tenant_count = count,
            base_amount,
            remainder,
            "家賃均等分配完成"
        );
        Ok(DistributionSummary {
            property_id,
            tenant_count: count,
            base_amount,
            remainder,
        })
    }
}

impl Default for RentAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property::Property;
    use crate::domain::tenant::Tenant;
    use crate::domain::types::TenantStatus;

    fn db_with(rent_price_uns: i64, statuses: &[TenantStatus]) -> Database {
        let mut db = Database::default();
        db.properties.push(Property {
            id: 1,
            name: "Sakura".to_string(),
            address: String::new(),
            postal_code: String::new(),
            phone: String::new(),
            unit_type: String::new(),
            capacity: 20,
            rent_cost: 0,
            rent_price_uns,
            parking_cost: 0,
            contract_start: None,
            contract_end: None,
        });
        for (i, status) in statuses.iter().enumerate() {
            db.tenants.push(Tenant {
                id: i as i64 + 1,
                employee_id: String::new(),
                name: String::new(),
                kana: format!("カナ{}", i),
                property_id: 1,
                rent_contribution: 11111, // 分配前的旧值
                parking_fee: 0,
                entry_date: None,
                status: *status,
            });
        }
        db
    }

    #[test]
    fn test_distribute_100_over_3_tenants() {
        let mut db = db_with(100, &[TenantStatus::Active; 3]);
        let summary = RentAllocator::new().distribute_evenly(&mut db, 1).unwrap();

        assert_eq!(summary.base_amount, 33);
        assert_eq!(summary.remainder, 1);
        let assigned: Vec<i64> = db.tenants.iter().map(|t| t.rent_contribution).collect();
        assert_eq!(assigned, vec![34, 33, 33]);
    }

    #[test]
    fn test_distribution_conserves_total_exactly() {
        for (total, n) in [(80000, 3), (100000, 7), (1, 5), (0, 2)] {
            let mut db = db_with(total, &vec![TenantStatus::Active; n]);
            RentAllocator::new().distribute_evenly(&mut db, 1).unwrap();

            let sum: i64 = db.tenants.iter().map(|t| t.rent_contribution).sum();
            assert_eq!(sum, total, "total={} n={}", total, n);

            // 首名承担全部余数
            if n > 1 {
                let first = db.tenants[0].rent_contribution;
                for t in &db.tenants[1..] {
                    assert_eq!(first, t.rent_contribution + total % n as i64);
                }
            }
        }
    }

    #[test]
    fn test_inactive_tenants_excluded_and_untouched() {
        let mut db = db_with(
            90,
            &[
                TenantStatus::Active,
                TenantStatus::Inactive,
                TenantStatus::Active,
            ],
        );
        RentAllocator::new().distribute_evenly(&mut db, 1).unwrap();

        assert_eq!(db.tenants[0].rent_contribution, 45);
        assert_eq!(db.tenants[1].rent_contribution, 11111); // 退去者不动
        assert_eq!(db.tenants[2].rent_contribution, 45);
    }

    #[test]
    fn test_zero_active_tenants_errors_without_mutation() {
        let mut db = db_with(80000, &[TenantStatus::Inactive, TenantStatus::Inactive]);
        let result = RentAllocator::new().distribute_evenly(&mut db, 1);

        assert!(matches!(result, Err(EngineError::NothingToDistribute(1))));
        // 既有记录保持原样
        assert!(db.tenants.iter().all(|t| t.rent_contribution == 11111));
    }

    #[test]
    fn test_missing_property_errors() {
        let mut db = Database::default();
        let result = RentAllocator::new().distribute_evenly(&mut db, 42);
        assert!(matches!(result, Err(EngineError::PropertyNotFound(42))));
    }
}
