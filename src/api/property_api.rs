// ==========================================
// 賃貸管理システム - 物件 API
// ==========================================
// 职责: 物件 CRUD + 家賃均等分配入口
// 红线: 更新操作以「更新后形态」整体重过行模式校验器；
//       删除物件级联删除其入居者
// ==========================================

use crate::api::error::MutationOutcome;
use crate::api::time_derived_id;
use crate::domain::database::Database;
use crate::domain::property::Property;
use crate::engine::allocation::RentAllocator;
use crate::engine::error::EngineError;
use crate::importer::row_validator::{PropertyDraft, RowValidator};
use tracing::info;

pub struct PropertyApi {
    validator: RowValidator,
    allocator: RentAllocator,
}

impl PropertyApi {
    pub fn new() -> Self {
        Self {
            validator: RowValidator::new(),
            allocator: RentAllocator::new(),
        }
    }

    /// 新增物件（id 取当前时刻派生整数）
    pub fn add_property(&self, db: &mut Database, draft: &PropertyDraft) -> MutationOutcome {
        let mut property = match self.validator.validate_property(draft) {
            Ok(property) => property,
            Err(violations) => return MutationOutcome::from_violations(violations),
        };
        property.id = time_derived_id(|id| db.property(id).is_some());

        info!(property_id = property.id, name = %property.name, "新增物件");
        db.properties.push(property);
        MutationOutcome::ok()
    }

    /// 更新物件（更新后形态整体重校验，id 不变）
    pub fn update_property(
        &self,
        db: &mut Database,
        id: i64,
        draft: &PropertyDraft,
    ) -> MutationOutcome {
        if db.property(id).is_none() {
            return MutationOutcome::failed_with(format!("物件不存在: id={}", id));
        }
        let validated = match self.validator.validate_property(draft) {
            Ok(property) => property,
            Err(violations) => return MutationOutcome::from_violations(violations),
        };
        if let Some(property) = db.property_mut(id) {
            *property = Property { id, ..validated };
        }
        MutationOutcome::ok()
    }

    /// 删除物件（级联删除其全部入居者）
    pub fn delete_property(&self, db: &mut Database, id: i64) -> MutationOutcome {
        let (removed, cascaded) = db.remove_property(id);
        if !removed {
            return MutationOutcome::failed_with(format!("物件不存在: id={}", id));
        }
        info!(property_id = id, cascaded_tenants = cascaded, "删除物件");
        MutationOutcome::ok()
    }

    pub fn get_property<'a>(&self, db: &'a Database, id: i64) -> Option<&'a Property> {
        db.property(id)
    }

    /// 家賃均等分配（零名在住入居者时返回用户可见错误，不改动记录）
    pub fn distribute_evenly(&self, db: &mut Database, property_id: i64) -> MutationOutcome {
        match self.allocator.distribute_evenly(db, property_id) {
            Ok(_) => MutationOutcome::ok(),
            Err(err @ EngineError::NothingToDistribute(_))
            | Err(err @ EngineError::PropertyNotFound(_)) => {
                MutationOutcome::failed_with(err.to_string())
            }
            Err(other) => MutationOutcome::failed_with(other.to_string()),
        }
    }
}

impl Default for PropertyApi {
    fn default() -> Self {
        Self::new()
    }
}
