// ==========================================
// 賃貸管理システム - 导入结果模型
// ==========================================
// 候选图: 物件候选 id 为本次导入域内的临时顺序 id（1..n），
//         入居者候选的 property_id 引用该临时 id；
//         正式 id 由合并引擎通过临时 id 映射统一铸造
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::property::Property;
use crate::domain::tenant::Tenant;
use crate::domain::types::ImportKind;
use serde::{Deserialize, Serialize};

// ==========================================
// RowError - 行级错误
// ==========================================
// 覆盖: 模式违反 / 物件关联失败 / 完整性违反（row_index = 0）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row_index: usize, // 数据行号（1 起算；0 = 非行级）
    pub field: String,
    pub message: String,
}

// ==========================================
// ImportOutcome - 单次导入管道运行结果
// ==========================================
// 部分成功是一等公民: success=false 时候选集依然可用，
// 错误列表可枚举，供操作员在合并前修正
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub batch_id: String, // 导入批次（UUID）
    pub success: bool,
    pub kind: ImportKind,
    pub properties: Vec<Property>, // id = 临时顺序 id
    pub tenants: Vec<Tenant>,      // property_id = 临时顺序 id
    pub employees: Vec<Employee>,
    pub errors: Vec<RowError>,
    pub summary: String,
}

impl ImportOutcome {
    /// 空结果骨架（管道起点）
    pub fn new(batch_id: String, kind: ImportKind) -> Self {
        Self {
            batch_id,
            success: false,
            kind,
            properties: Vec::new(),
            tenants: Vec::new(),
            employees: Vec::new(),
            errors: Vec::new(),
            summary: String::new(),
        }
    }

    /// 无法识别的工作簿: 零候选的失败结果（正常结局，不抛错）
    pub fn unrecognized(batch_id: String, sheet_names: &[String]) -> Self {
        let mut outcome = Self::new(batch_id, ImportKind::Unrecognized);
        outcome.summary = format!(
            "无法识别的工作簿格式: 工作表 [{}] 未命中任何已知名簿/物件/入居标记",
            sheet_names.join(", ")
        );
        outcome
    }

    pub fn candidate_count(&self) -> usize {
        self.properties.len() + self.tenants.len() + self.employees.len()
    }
}
