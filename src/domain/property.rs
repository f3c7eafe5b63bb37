// ==========================================
// 賃貸管理システム - 物件领域模型
// ==========================================
// 不变量: capacity >= 1
// 活跃判定: 契約終了日 缺失/不可解析/在将来 => 活跃（fail-open）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// 契约日期接受的书写格式（电子表格常见两种）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

// ==========================================
// DateParse - 契约日期三态解析结果
// ==========================================
// 活跃规则只看此结果，fail-open 策略在一处可见:
// Missing / Unparseable 一律按活跃处理，绝不因此拒绝数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateParse {
    Valid(NaiveDate),
    Missing,
    Unparseable,
}

/// 解析契约日期单元格（原样保存的字符串）
pub fn parse_contract_date(raw: Option<&str>) -> DateParse {
    let value = match raw {
        None => return DateParse::Missing,
        Some(v) => v.trim(),
    };
    if value.is_empty() {
        return DateParse::Missing;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return DateParse::Valid(date);
        }
    }
    DateParse::Unparseable
}

// ==========================================
// Property - 物件主数据
// ==========================================
// id 由直接 CRUD（当前时刻派生）或合并引擎铸造，校验器从不赋予
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    // ===== 主键 =====
    pub id: i64,

    // ===== 基础信息 =====
    pub name: String,            // 物件名（2-100字）
    pub address: String,         // 住所
    pub postal_code: String,     // 郵便番号（###-####）
    pub phone: String,           // 電話番号（10-11位）
    pub unit_type: String,       // 間取り/タイプ

    // ===== 容量 =====
    pub capacity: i64,           // 入居人数上限（1-20）

    // ===== 金额（円，整数） =====
    pub rent_cost: i64,          // 家賃（支付给外部业主）
    pub rent_price_uns: i64,     // USN家賃（应收目标额）
    pub parking_cost: i64,       // 駐車場费用

    // ===== 契约期间（原样保存，解析推迟到活跃判定） =====
    pub contract_start: Option<String>,
    pub contract_end: Option<String>,
}

impl Property {
    /// 契約終了日的三态解析结果
    pub fn contract_end_parse(&self) -> DateParse {
        parse_contract_date(self.contract_end.as_deref())
    }

    /// 活跃判定（fail-open）
    ///
    /// 契約終了日缺失或不可解析 => 活跃；
    /// 可解析时仅当严格晚于 today 才算活跃
    pub fn is_active(&self, today: NaiveDate) -> bool {
        match self.contract_end_parse() {
            DateParse::Missing | DateParse::Unparseable => true,
            DateParse::Valid(end) => end > today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property_with_end(contract_end: Option<&str>) -> Property {
        Property {
            id: 1,
            name: "Sakura".to_string(),
            address: "東京都港区1-2-3".to_string(),
            postal_code: "123-4567".to_string(),
            phone: "0312345678".to_string(),
            unit_type: "1K".to_string(),
            capacity: 2,
            rent_cost: 50000,
            rent_price_uns: 80000,
            parking_cost: 0,
            contract_start: None,
            contract_end: contract_end.map(|s| s.to_string()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()
    }

    #[test]
    fn test_active_when_contract_end_missing() {
        assert!(property_with_end(None).is_active(today()));
        assert!(property_with_end(Some("   ")).is_active(today()));
    }

    #[test]
    fn test_active_when_contract_end_unparseable() {
        // fail-open: 垃圾日期按活跃处理，不拒绝
        let p = property_with_end(Some("未定"));
        assert_eq!(p.contract_end_parse(), DateParse::Unparseable);
        assert!(p.is_active(today()));
    }

    #[test]
    fn test_active_when_contract_end_in_future() {
        assert!(property_with_end(Some("2027-01-01")).is_active(today()));
        assert!(property_with_end(Some("2027/01/01")).is_active(today()));
    }

    #[test]
    fn test_inactive_when_contract_end_passed() {
        assert!(!property_with_end(Some("2026-01-01")).is_active(today()));
        // 终了日当天不算活跃（严格在将来）
        assert!(!property_with_end(Some("2026-08-27")).is_active(today()));
    }
}
