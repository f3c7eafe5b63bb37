// ==========================================
// 賃貸管理システム - 规范存储（聚合根）
// ==========================================
// 红线: 唯一事实层。宿主持有所有权，组件按调用借用；
//       写入方整体读-改-写，不做局部/流式写入
// 写入方: 合并引擎与直接 CRUD 操作，此外一律只读
// ==========================================

use crate::domain::config::SystemConfig;
use crate::domain::employee::Employee;
use crate::domain::property::Property;
use crate::domain::tenant::Tenant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub properties: Vec<Property>,
    pub tenants: Vec<Tenant>,
    pub employees: Vec<Employee>,
    pub config: SystemConfig,
    pub version: String,       // 模式版本标签
    pub last_sync: Option<DateTime<Utc>>, // 最近一次合并时间
}

impl Default for Database {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            tenants: Vec::new(),
            employees: Vec::new(),
            config: SystemConfig::default(),
            version: crate::DB_VERSION.to_string(),
            last_sync: None,
        }
    }
}

impl Database {
    // ==========================================
    // 查询
    // ==========================================

    pub fn property(&self, id: i64) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn property_mut(&mut self, id: i64) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| p.id == id)
    }

    pub fn tenant(&self, id: i64) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.id == id)
    }

    pub fn tenant_mut(&mut self, id: i64) -> Option<&mut Tenant> {
        self.tenants.iter_mut().find(|t| t.id == id)
    }

    /// 指定物件的入居者（保持存储迭代顺序）
    pub fn tenants_by_property(&self, property_id: i64) -> Vec<&Tenant> {
        self.tenants
            .iter()
            .filter(|t| t.property_id == property_id)
            .collect()
    }

    pub fn employee_by_id(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    // ==========================================
    // id 铸造（合并引擎用: 顺序、确定性）
    // ==========================================

    pub fn next_property_id(&self) -> i64 {
        self.properties.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    pub fn next_tenant_id(&self) -> i64 {
        self.tenants.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    // ==========================================
    // 删除
    // ==========================================

    /// 删除物件，并级联删除其全部入居者
    ///
    /// # 返回
    /// (物件是否存在, 被级联删除的入居者数)
    pub fn remove_property(&mut self, id: i64) -> (bool, usize) {
        let before = self.properties.len();
        self.properties.retain(|p| p.id != id);
        if self.properties.len() == before {
            return (false, 0);
        }
        let tenants_before = self.tenants.len();
        self.tenants.retain(|t| t.property_id != id);
        (true, tenants_before - self.tenants.len())
    }

    pub fn remove_tenant(&mut self, id: i64) -> bool {
        let before = self.tenants.len();
        self.tenants.retain(|t| t.id != id);
        self.tenants.len() != before
    }
}
