// ==========================================
// 賃貸管理システム - 社員领域模型
// ==========================================
// 主键: 外部社員编码（字符串，唯一，来自源数据）
// 红线: full_data 原样保留导入行，仅作审计，除 id/name 外不校验
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    // ===== 主键（社員番号） =====
    pub id: String,

    // ===== 基础信息 =====
    pub name: String,
    pub kana: String,    // 缺失时置空串，不报错
    pub company: String, // 缺失时置空串，不报错

    // ===== 审计: 原始导入行（列名 → 单元格值） =====
    pub full_data: HashMap<String, String>,
}
