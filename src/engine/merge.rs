// ==========================================
// 賃貸管理システム - 合并引擎
// ==========================================
// 规则:
//   社員   - id 已存在则静默跳过（先写先赢，不更新不报错）
//   物件   - 无条件追加，正式 id 在此铸造，临时 id 作废
//   入居者 - 无条件追加，property_id 经临时 id 映射改写
// 红线: 只增不改 —— 既有记录的删除/更新只走直接 CRUD，绝不经导入
// ==========================================

use crate::domain::database::Database;
use crate::domain::import::ImportOutcome;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

// ==========================================
// MergeSummary - 合并统计（操作员反馈用）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSummary {
    pub added_properties: usize,
    pub added_tenants: usize,
    pub added_employees: usize,
    pub skipped_employees: usize, // 先写先赢跳过数
    pub skipped_tenants: usize,   // 临时 id 无法解析的入居候选（候选图损坏时才会出现）
}

// ==========================================
// MergeEngine - 合并引擎
// ==========================================
pub struct MergeEngine;

impl MergeEngine {
    pub fn new() -> Self {
        Self
    }

    /// 将一次导入的候选集合并进规范存储
    ///
    /// 入居者与物件的关联经「临时 id → 铸造 id」显式映射改写，
    /// 不依赖候选顺序对位；合并完成后盖 last_sync 时间戳
    #[instrument(skip(self, db, outcome), fields(batch_id = %outcome.batch_id))]
    pub fn merge(&self, db: &mut Database, outcome: &ImportOutcome) -> MergeSummary {
        let mut summary = MergeSummary {
            added_properties: 0,
            added_tenants: 0,
            added_employees: 0,
            skipped_employees: 0,
            skipped_tenants: 0,
        };

        // === 社員: 先写先赢 ===
        for employee in &outcome.employees {
            if db.employee_by_id(&employee.id).is_some() {
                summary.skipped_employees += 1;
                continue;
            }
            db.employees.push(employee.clone());
            summary.added_employees += 1;
        }

        // === 物件: 铸造正式 id，登记临时 id 映射 ===
        let mut id_map: HashMap<i64, i64> = HashMap::new();
        for candidate in &outcome.properties {
            let minted_id = db.next_property_id();
            id_map.insert(candidate.id, minted_id);

            let mut property = candidate.clone();
            property.id = minted_id;
            db.properties.push(property);
            summary.added_properties += 1;
        }

        // === 入居者: 经映射改写归属后追加 ===
        for candidate in &outcome.tenants {
            let minted_property_id = match id_map.get(&candidate.property_id) {
                Some(&id) => id,
                None => {
                    warn!(
                        tenant_kana = %candidate.kana,
                        temp_property_id = candidate.property_id,
                        "入居候选的临时物件 id 无法解析，跳过"
                    );
                    summary.skipped_tenants += 1;
                    continue;
                }
            };

            let mut tenant = candidate.clone();
            tenant.id = db.next_tenant_id();
            tenant.property_id = minted_property_id;
            db.tenants.push(tenant);
            summary.added_tenants += 1;
        }

        db.last_sync = Some(Utc::now());

        info!(
            added_properties = summary.added_properties,
            added_tenants = summary.added_tenants,
            added_employees = summary.added_employees,
            skipped_employees = summary.skipped_employees,
            "合并完成"
        );
        summary
    }
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new()
    }
}
