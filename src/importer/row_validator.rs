// ==========================================
// 賃貸管理システム - 行模式校验器
// ==========================================
// 输入: 一条原始行（或等价草稿） + 目标实体类型
// 输出: Ok(类型化候选) / Err(字段级违规列表)
// 红线: 身份字段从严、金额字段从宽 —— 电子表格里空白金额
//       意味着 0 或待填，坏数字静默归零，绝不据此拒行；
//       候选 id 一律置 0，正式 id 由合并引擎/CRUD 赋予
// ==========================================

use crate::domain::property::Property;
use crate::domain::tenant::Tenant;
use crate::domain::types::TenantStatus;
use crate::domain::Employee;
use crate::importer::workbook::RawRow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 列名别名表（固定词表，写法不一的表头统一在此吸收）
// ==========================================

pub const COL_PROPERTY_NAME: &[&str] = &["ｱﾊﾟｰﾄ", "アパート", "物件名"];
pub const COL_ADDRESS: &[&str] = &["住所", "所在地"];
pub const COL_POSTAL: &[&str] = &["郵便番号", "〒"];
pub const COL_PHONE: &[&str] = &["電話番号", "TEL"];
pub const COL_UNIT_TYPE: &[&str] = &["間取り", "タイプ"];
pub const COL_CAPACITY: &[&str] = &["入居人数", "定員"];
pub const COL_RENT: &[&str] = &["家賃"];
pub const COL_RENT_PRICE_UNS: &[&str] = &["USN家賃", "USN賃料"];
pub const COL_PARKING: &[&str] = &["駐車場代", "駐車場"];
pub const COL_CONTRACT_START: &[&str] = &["契約開始日", "契約開始"];
pub const COL_CONTRACT_END: &[&str] = &["契約終了日", "契約終了"];

pub const COL_EMPLOYEE_ID: &[&str] = &["社員番号", "社員No", "社員ID", "ID"];
pub const COL_NAME: &[&str] = &["氏名", "名前", "社員名"];
pub const COL_KANA: &[&str] = &["カナ", "フリガナ"];
pub const COL_COMPANY: &[&str] = &["会社名", "会社", "所属"];
pub const COL_ENTRY_DATE: &[&str] = &["入居日"];
pub const COL_STATUS: &[&str] = &["状態", "ステータス"];

// 入居日接受的书写格式
const ENTRY_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

// ==========================================
// FieldViolation - 字段级违规
// ==========================================
// 行号由管道补充（校验器不感知行位置）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ==========================================
// 草稿类型 - 校验前的松散形态
// ==========================================
// 导入管道经 from_row 构建；直接 CRUD 由宿主按字段填写，
// 更新操作同样以「更新后形态」整体过校验
#[derive(Debug, Clone, Default)]
pub struct PropertyDraft {
    pub name: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub unit_type: Option<String>,
    pub capacity: Option<String>,
    pub rent_cost: Option<String>,
    pub rent_price_uns: Option<String>,
    pub parking_cost: Option<String>,
    pub contract_start: Option<String>,
    pub contract_end: Option<String>,
}

impl PropertyDraft {
    pub fn from_row(row: &RawRow) -> Self {
        Self {
            name: row.get_any(COL_PROPERTY_NAME).map(String::from),
            address: row.get_any(COL_ADDRESS).map(String::from),
            postal_code: row.get_any(COL_POSTAL).map(String::from),
            phone: row.get_any(COL_PHONE).map(String::from),
            unit_type: row.get_any(COL_UNIT_TYPE).map(String::from),
            capacity: row.get_any(COL_CAPACITY).map(String::from),
            rent_cost: row.get_any(COL_RENT).map(String::from),
            rent_price_uns: row.get_any(COL_RENT_PRICE_UNS).map(String::from),
            parking_cost: row.get_any(COL_PARKING).map(String::from),
            contract_start: row.get_any(COL_CONTRACT_START).map(String::from),
            contract_end: row.get_any(COL_CONTRACT_END).map(String::from),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TenantDraft {
    pub employee_id: Option<String>,
    pub name: Option<String>,
    pub kana: Option<String>,
    pub property_id: Option<String>,
    pub rent_contribution: Option<String>,
    pub parking_fee: Option<String>,
    pub entry_date: Option<String>,
    pub status: Option<String>,
}

impl TenantDraft {
    /// 由入居行构建（property_id 由管道按物件名匹配后填入）
    pub fn from_row(row: &RawRow) -> Self {
        Self {
            employee_id: row.get_any(COL_EMPLOYEE_ID).map(String::from),
            name: row.get_any(COL_NAME).map(String::from),
            kana: row.get_any(COL_KANA).map(String::from),
            property_id: None,
            rent_contribution: row.get_any(COL_RENT).map(String::from),
            parking_fee: row.get_any(COL_PARKING).map(String::from),
            entry_date: row.get_any(COL_ENTRY_DATE).map(String::from),
            status: row.get_any(COL_STATUS).map(String::from),
        }
    }
}

// ==========================================
// 数值宽松强制策略
// ==========================================

/// 金额单元格强制转换: 字符串化 → trim → 整数解析，
/// 失败一律归 0（缺失/坏数字都不是行级错误）
pub fn coerce_amount(raw: Option<&str>) -> i64 {
    let value = match raw {
        None => return 0,
        Some(v) => v.trim(),
    };
    if value.is_empty() {
        return 0;
    }
    if let Ok(n) = value.parse::<i64>() {
        return n;
    }
    // Excel 数值单元格常以浮点形式落地（"2.0" 等）
    if let Ok(f) = value.parse::<f64>() {
        return f.trunc() as i64;
    }
    0
}

// ==========================================
// RowValidator - 行模式校验器
// ==========================================
pub struct RowValidator;

impl RowValidator {
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 物件
    // ==========================================

    /// 校验物件草稿
    ///
    /// 规则:
    /// - 物件名必填，2-100 字
    /// - 住所给出时 >= 5 字；郵便番号给出时须 ###-####（连字符可省）；
    ///   電話番号给出时须 10-11 位数字
    /// - 入居人数 1-20（缺失默认 1；给出但坏值归 0 → 范围违规）
    /// - 各金额字段宽松归零后须非负
    pub fn validate_property(&self, draft: &PropertyDraft) -> Result<Property, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        // 物件名（身份字段，从严）
        let name = draft.name.as_deref().map(str::trim).unwrap_or("");
        let name_len = name.chars().count();
        if name_len < 2 || name_len > 100 {
            violations.push(FieldViolation::new("name", "物件名必须为 2-100 字"));
        }

        // 住所（给出时才查长度）
        let address = draft.address.as_deref().map(str::trim).unwrap_or("");
        if !address.is_empty() && address.chars().count() < 5 {
            violations.push(FieldViolation::new("address", "住所至少 5 字"));
        }

        // 郵便番号
        let postal_code = draft.postal_code.as_deref().map(str::trim).unwrap_or("");
        if !postal_code.is_empty() && !is_valid_postal_code(postal_code) {
            violations.push(FieldViolation::new(
                "postal_code",
                "郵便番号格式须为 ###-####（连字符可省略）",
            ));
        }

        // 電話番号
        let phone = draft.phone.as_deref().map(str::trim).unwrap_or("");
        if !phone.is_empty() && !is_valid_phone(phone) {
            violations.push(FieldViolation::new("phone", "電話番号须为 10-11 位数字"));
        }

        // 入居人数: 缺失默认 1；给出但坏值经强制归 0，落入范围违规
        let capacity = match draft.capacity.as_deref() {
            None => 1,
            Some(raw) => coerce_amount(Some(raw)),
        };
        if !(1..=20).contains(&capacity) {
            violations.push(FieldViolation::new("capacity", "入居人数须为 1-20 的整数"));
        }

        // 金额字段（宽松强制后仅做非负约束）
        let rent_cost = coerce_amount(draft.rent_cost.as_deref());
        let rent_price_uns = coerce_amount(draft.rent_price_uns.as_deref());
        let parking_cost = coerce_amount(draft.parking_cost.as_deref());
        for (field, value) in [
            ("rent_cost", rent_cost),
            ("rent_price_uns", rent_price_uns),
            ("parking_cost", parking_cost),
        ] {
            if value < 0 {
                violations.push(FieldViolation::new(field, "金额不可为负数"));
            }
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(Property {
            id: 0,
            name: name.to_string(),
            address: address.to_string(),
            postal_code: postal_code.to_string(),
            phone: phone.to_string(),
            unit_type: draft
                .unit_type
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .to_string(),
            capacity,
            rent_cost,
            rent_price_uns,
            parking_cost,
            contract_start: draft.contract_start.clone(),
            contract_end: draft.contract_end.clone(),
        })
    }

    // ==========================================
    // 入居者
    // ==========================================

    /// 校验入居者草稿
    ///
    /// 规则:
    /// - カナ必填（>= 1 字）
    /// - 社員番号: 列给出时须非空；列本身缺失时置空串
    ///   （名簿类电子表格经常不带此列）
    /// - property_id 须为正整数
    /// - 入居日给出时须可解析为日期
    /// - 金额字段宽松归零后须非负
    pub fn validate_tenant(&self, draft: &TenantDraft) -> Result<Tenant, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        // カナ（身份字段，从严）
        let kana = draft.kana.as_deref().map(str::trim).unwrap_or("");
        if kana.is_empty() {
            violations.push(FieldViolation::new("kana", "カナ不能为空"));
        }

        // 社員番号
        let employee_id = match draft.employee_id.as_deref() {
            None => String::new(),
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    violations.push(FieldViolation::new("employee_id", "社員番号不能为空"));
                }
                trimmed.to_string()
            }
        };

        // 归属物件
        let property_id = draft
            .property_id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(0);
        if property_id <= 0 {
            violations.push(FieldViolation::new(
                "property_id",
                "property_id 须为正整数",
            ));
        }

        // 入居日（给出时才要求可解析）
        let entry_date = match draft.entry_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match parse_entry_date(raw) {
                Some(date) => Some(date),
                None => {
                    violations.push(FieldViolation::new(
                        "entry_date",
                        format!("入居日无法解析: {}", raw),
                    ));
                    None
                }
            },
        };

        // 金额字段
        let rent_contribution = coerce_amount(draft.rent_contribution.as_deref());
        let parking_fee = coerce_amount(draft.parking_fee.as_deref());
        for (field, value) in [
            ("rent_contribution", rent_contribution),
            ("parking_fee", parking_fee),
        ] {
            if value < 0 {
                violations.push(FieldViolation::new(field, "金额不可为负数"));
            }
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(Tenant {
            id: 0,
            employee_id,
            name: draft
                .name
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .to_string(),
            kana: kana.to_string(),
            property_id,
            rent_contribution,
            parking_fee,
            entry_date,
            status: parse_status(draft.status.as_deref()),
        })
    }

    // ==========================================
    // 社員
    // ==========================================

    /// 校验社員行
    ///
    /// 规则: 社員番号与氏名必填（>= 1 字）；
    /// カナ/会社名缺失时置空串；原始行整体留存于 full_data
    pub fn validate_employee(&self, row: &RawRow) -> Result<Employee, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let id = row.get_any(COL_EMPLOYEE_ID).unwrap_or("");
        if id.is_empty() {
            violations.push(FieldViolation::new("id", "社員番号不能为空"));
        }

        let name = row.get_any(COL_NAME).unwrap_or("");
        if name.is_empty() {
            violations.push(FieldViolation::new("name", "氏名不能为空"));
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(Employee {
            id: id.to_string(),
            name: name.to_string(),
            kana: row.get_any(COL_KANA).unwrap_or("").to_string(),
            company: row.get_any(COL_COMPANY).unwrap_or("").to_string(),
            full_data: row.cells().clone(),
        })
    }
}

impl Default for RowValidator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 字段格式辅助
// ==========================================

/// 郵便番号: ###-#### 或 #######（连字符可省）
fn is_valid_postal_code(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    match chars.len() {
        7 => chars.iter().all(|c| c.is_ascii_digit()),
        8 => {
            chars[3] == '-'
                && chars[..3].iter().all(|c| c.is_ascii_digit())
                && chars[4..].iter().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// 電話番号: 去连字符后 10-11 位数字
fn is_valid_phone(value: &str) -> bool {
    let digits: String = value.chars().filter(|c| *c != '-').collect();
    (10..=11).contains(&digits.chars().count()) && digits.chars().all(|c| c.is_ascii_digit())
}

fn parse_entry_date(value: &str) -> Option<NaiveDate> {
    ENTRY_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// 状态单元格 → TenantStatus（默认在住）
fn parse_status(raw: Option<&str>) -> TenantStatus {
    match raw.map(str::trim) {
        Some("inactive") | Some("退去") | Some("退去済") => TenantStatus::Inactive,
        _ => TenantStatus::Active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::workbook::RawRow;

    fn validator() -> RowValidator {
        RowValidator::new()
    }

    // ===== 数值强制策略 =====

    #[test]
    fn test_coerce_amount_lenient_policy() {
        assert_eq!(coerce_amount(Some("50000")), 50000);
        assert_eq!(coerce_amount(Some(" 50000 ")), 50000);
        assert_eq!(coerce_amount(Some("50000.0")), 50000);
        // 坏数字静默归零，不报错
        assert_eq!(coerce_amount(Some("五万円")), 0);
        assert_eq!(coerce_amount(Some("")), 0);
        assert_eq!(coerce_amount(None), 0);
    }

    // ===== 物件 =====

    #[test]
    fn test_property_minimal_row_is_valid() {
        // 仅物件名+人数+金额的行必须通过（住所等给出时才校验）
        let row = RawRow::from_pairs([
            ("ｱﾊﾟｰﾄ", "Sakura"),
            ("入居人数", "2"),
            ("家賃", "50000"),
            ("USN家賃", "80000"),
        ]);
        let property = validator()
            .validate_property(&PropertyDraft::from_row(&row))
            .unwrap();

        assert_eq!(property.name, "Sakura");
        assert_eq!(property.capacity, 2);
        assert_eq!(property.rent_cost, 50000);
        assert_eq!(property.rent_price_uns, 80000);
        assert_eq!(property.parking_cost, 0); // 空白金额 = 0
        assert_eq!(property.id, 0); // id 永不由校验器赋予
    }

    #[test]
    fn test_property_name_length_bounds() {
        let too_short = PropertyDraft {
            name: Some("A".to_string()),
            ..Default::default()
        };
        let violations = validator().validate_property(&too_short).unwrap_err();
        assert!(violations.iter().any(|v| v.field == "name"));

        let missing = PropertyDraft::default();
        assert!(validator().validate_property(&missing).is_err());
    }

    #[test]
    fn test_property_capacity_rules() {
        // 缺失默认 1
        let draft = PropertyDraft {
            name: Some("Sakura".to_string()),
            ..Default::default()
        };
        assert_eq!(validator().validate_property(&draft).unwrap().capacity, 1);

        // 给出但坏值 → 归 0 → 范围违规
        let draft = PropertyDraft {
            name: Some("Sakura".to_string()),
            capacity: Some("多数".to_string()),
            ..Default::default()
        };
        let violations = validator().validate_property(&draft).unwrap_err();
        assert!(violations.iter().any(|v| v.field == "capacity"));

        // 超出上限
        let draft = PropertyDraft {
            name: Some("Sakura".to_string()),
            capacity: Some("21".to_string()),
            ..Default::default()
        };
        assert!(validator().validate_property(&draft).is_err());
    }

    #[test]
    fn test_property_postal_and_phone_format() {
        let draft = PropertyDraft {
            name: Some("Sakura".to_string()),
            postal_code: Some("123-4567".to_string()),
            phone: Some("03-1234-5678".to_string()),
            ..Default::default()
        };
        assert!(validator().validate_property(&draft).is_ok());

        // 连字符可省
        let draft = PropertyDraft {
            name: Some("Sakura".to_string()),
            postal_code: Some("1234567".to_string()),
            ..Default::default()
        };
        assert!(validator().validate_property(&draft).is_ok());

        let draft = PropertyDraft {
            name: Some("Sakura".to_string()),
            postal_code: Some("12-34567".to_string()),
            phone: Some("123".to_string()),
            ..Default::default()
        };
        let violations = validator().validate_property(&draft).unwrap_err();
        assert!(violations.iter().any(|v| v.field == "postal_code"));
        assert!(violations.iter().any(|v| v.field == "phone"));
    }

    #[test]
    fn test_property_negative_amount_rejected() {
        let draft = PropertyDraft {
            name: Some("Sakura".to_string()),
            rent_cost: Some("-100".to_string()),
            ..Default::default()
        };
        let violations = validator().validate_property(&draft).unwrap_err();
        assert!(violations.iter().any(|v| v.field == "rent_cost"));
    }

    // ===== 入居者 =====

    #[test]
    fn test_tenant_kana_required() {
        let draft = TenantDraft {
            property_id: Some("1".to_string()),
            ..Default::default()
        };
        let violations = validator().validate_tenant(&draft).unwrap_err();
        assert!(violations.iter().any(|v| v.field == "kana"));
    }

    #[test]
    fn test_tenant_employee_id_absent_defaults_empty() {
        // 列缺失 → 空串，不报错
        let draft = TenantDraft {
            kana: Some("タナカ".to_string()),
            property_id: Some("1".to_string()),
            rent_contribution: Some("40000".to_string()),
            ..Default::default()
        };
        let tenant = validator().validate_tenant(&draft).unwrap();
        assert_eq!(tenant.employee_id, "");
        assert_eq!(tenant.rent_contribution, 40000);
    }

    #[test]
    fn test_tenant_employee_id_present_but_empty_rejected() {
        let draft = TenantDraft {
            employee_id: Some("   ".to_string()),
            kana: Some("タナカ".to_string()),
            property_id: Some("1".to_string()),
            ..Default::default()
        };
        let violations = validator().validate_tenant(&draft).unwrap_err();
        assert!(violations.iter().any(|v| v.field == "employee_id"));
    }

    #[test]
    fn test_tenant_property_id_must_be_positive() {
        let draft = TenantDraft {
            kana: Some("タナカ".to_string()),
            property_id: Some("0".to_string()),
            ..Default::default()
        };
        assert!(validator().validate_tenant(&draft).is_err());

        let draft = TenantDraft {
            kana: Some("タナカ".to_string()),
            property_id: None,
            ..Default::default()
        };
        assert!(validator().validate_tenant(&draft).is_err());
    }

    #[test]
    fn test_tenant_entry_date_parseable_when_present() {
        let draft = TenantDraft {
            kana: Some("タナカ".to_string()),
            property_id: Some("1".to_string()),
            entry_date: Some("2026/04/01".to_string()),
            ..Default::default()
        };
        let tenant = validator().validate_tenant(&draft).unwrap();
        assert_eq!(
            tenant.entry_date,
            Some(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap())
        );

        let draft = TenantDraft {
            kana: Some("タナカ".to_string()),
            property_id: Some("1".to_string()),
            entry_date: Some("来月".to_string()),
            ..Default::default()
        };
        let violations = validator().validate_tenant(&draft).unwrap_err();
        assert!(violations.iter().any(|v| v.field == "entry_date"));
    }

    #[test]
    fn test_tenant_status_defaults_active() {
        let draft = TenantDraft {
            kana: Some("タナカ".to_string()),
            property_id: Some("1".to_string()),
            ..Default::default()
        };
        let tenant = validator().validate_tenant(&draft).unwrap();
        assert_eq!(tenant.status, TenantStatus::Active);

        let draft = TenantDraft {
            kana: Some("タナカ".to_string()),
            property_id: Some("1".to_string()),
            status: Some("退去".to_string()),
            ..Default::default()
        };
        let tenant = validator().validate_tenant(&draft).unwrap();
        assert_eq!(tenant.status, TenantStatus::Inactive);
    }

    // ===== 社員 =====

    #[test]
    fn test_employee_id_and_name_required() {
        let row = RawRow::from_pairs([("氏名", "田中太郎")]);
        let violations = validator().validate_employee(&row).unwrap_err();
        assert!(violations.iter().any(|v| v.field == "id"));

        let row = RawRow::from_pairs([("社員番号", "E001")]);
        let violations = validator().validate_employee(&row).unwrap_err();
        assert!(violations.iter().any(|v| v.field == "name"));
    }

    #[test]
    fn test_employee_optional_fields_default_empty() {
        let row = RawRow::from_pairs([("社員番号", "E001"), ("氏名", "田中太郎")]);
        let employee = validator().validate_employee(&row).unwrap();

        assert_eq!(employee.id, "E001");
        assert_eq!(employee.kana, "");
        assert_eq!(employee.company, "");
        // 原始行整体留存
        assert_eq!(
            employee.full_data.get("氏名"),
            Some(&"田中太郎".to_string())
        );
    }
}
