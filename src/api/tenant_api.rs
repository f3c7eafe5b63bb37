// ==========================================
// 賃貸管理システム - 入居者 API
// ==========================================
// 职责: 入居者 CRUD
// 直接 CRUD 额外要求 property_id 在规范存储中可解析
// （导入路径的候选集匹配由管道负责，此处不重复）
// ==========================================

use crate::api::error::MutationOutcome;
use crate::api::time_derived_id;
use crate::domain::database::Database;
use crate::domain::tenant::Tenant;
use crate::importer::row_validator::{RowValidator, TenantDraft};
use tracing::info;

pub struct TenantApi {
    validator: RowValidator,
}

impl TenantApi {
    pub fn new() -> Self {
        Self {
            validator: RowValidator::new(),
        }
    }

    /// 新增入居者（id 取当前时刻派生整数）
    pub fn add_tenant(&self, db: &mut Database, draft: &TenantDraft) -> MutationOutcome {
        let mut tenant = match self.validator.validate_tenant(draft) {
            Ok(tenant) => tenant,
            Err(violations) => return MutationOutcome::from_violations(violations),
        };
        if db.property(tenant.property_id).is_none() {
            return MutationOutcome::failed_with(format!(
                "物件不存在: id={}",
                tenant.property_id
            ));
        }
        tenant.id = time_derived_id(|id| db.tenant(id).is_some());

        info!(tenant_id = tenant.id, kana = %tenant.kana, "新增入居者");
        db.tenants.push(tenant);
        MutationOutcome::ok()
    }

    /// 更新入居者（更新后形态整体重校验，仅此入居者，不重查物件总额）
    pub fn update_tenant(&self, db: &mut Database, id: i64, draft: &TenantDraft) -> MutationOutcome {
        if db.tenant(id).is_none() {
            return MutationOutcome::failed_with(format!("入居者不存在: id={}", id));
        }
        let validated = match self.validator.validate_tenant(draft) {
            Ok(tenant) => tenant,
            Err(violations) => return MutationOutcome::from_violations(violations),
        };
        if db.property(validated.property_id).is_none() {
            return MutationOutcome::failed_with(format!(
                "物件不存在: id={}",
                validated.property_id
            ));
        }
        if let Some(tenant) = db.tenant_mut(id) {
            *tenant = Tenant { id, ..validated };
        }
        MutationOutcome::ok()
    }

    pub fn delete_tenant(&self, db: &mut Database, id: i64) -> MutationOutcome {
        if !db.remove_tenant(id) {
            return MutationOutcome::failed_with(format!("入居者不存在: id={}", id));
        }
        MutationOutcome::ok()
    }

    /// 指定物件的入居者（存储迭代顺序）
    pub fn tenants_by_property<'a>(&self, db: &'a Database, property_id: i64) -> Vec<&'a Tenant> {
        db.tenants_by_property(property_id)
    }
}

impl Default for TenantApi {
    fn default() -> Self {
        Self::new()
    }
}
