// ==========================================
// 賃貸管理システム - 工作簿分类器
// ==========================================
// 规则: 标记词固定词表，子串包含（区分大小写），按优先级先中先得
//   1) 命中社員名簿标记 → EmployeeImport
//   2) 命中物件台帳/入居名簿标记 → RentManagementImport
//   3) 其余 → Unrecognized（零候选的正常结局）
// ==========================================

use crate::domain::types::ImportKind;

/// 社員名簿工作表标记词
pub const EMPLOYEE_SHEET_TOKENS: &[&str] = &["社員名簿", "社員一覧", "社員リスト", "従業員"];

/// 物件台帳工作表标记词
pub const PROPERTY_SHEET_TOKENS: &[&str] = &["物件", "賃貸一覧"];

/// 入居者名簿工作表标记词
pub const TENANT_SHEET_TOKENS: &[&str] = &["入居"];

/// 工作簿分类（对有序工作表名列表）
pub fn classify(sheet_names: &[String]) -> ImportKind {
    if find_sheet(sheet_names, EMPLOYEE_SHEET_TOKENS).is_some() {
        return ImportKind::EmployeeImport;
    }
    if find_sheet(sheet_names, PROPERTY_SHEET_TOKENS).is_some()
        || find_sheet(sheet_names, TENANT_SHEET_TOKENS).is_some()
    {
        return ImportKind::RentManagementImport;
    }
    ImportKind::Unrecognized
}

/// 按标记词表找首个命中的工作表名（子串包含）
pub fn find_sheet<'a>(sheet_names: &'a [String], tokens: &[&str]) -> Option<&'a str> {
    sheet_names
        .iter()
        .find(|name| tokens.iter().any(|token| name.contains(token)))
        .map(|name| name.as_str())
}
