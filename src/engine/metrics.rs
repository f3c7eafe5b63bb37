// ==========================================
// 賃貸管理システム - 指标聚合器
// ==========================================
// 纯只读: 存储快照 + 今天 → 驾驶舱 KPI 与告警事实
// 告警无身份、不落库，每次调用重算
// ==========================================

use crate::domain::database::Database;
use crate::domain::property::{DateParse, Property};
use crate::domain::types::{AlertSeverity, AlertType};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// 契约到期告警阈值（天）
const EXPIRY_WARNING_DAYS: i64 = 60;
const EXPIRY_HIGH_SEVERITY_DAYS: i64 = 30;

// ==========================================
// AlertItem - 派生告警
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertItem {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub severity: AlertSeverity,
    pub timestamp: DateTime<Utc>,
}

// ==========================================
// DashboardSnapshot - 驾驶舱快照
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    // ===== 占用 =====
    pub active_property_count: usize,
    pub total_capacity: i64,    // 活跃物件容量合计
    pub occupancy_count: usize, // 在住入居者数
    pub occupancy_rate: f64,    // 在住数 / 容量合计（容量 0 时为 0）

    // ===== 金额（円） =====
    pub total_collected: i64, // 在住入居者 家賃+駐車場代 合计
    pub total_cost: i64,      // 活跃物件 家賃+駐車場 合计（应付业主）
    pub target_total: i64,    // 活跃物件 USN家賃 合计（应收目标）
    pub profit: i64,          // collected - cost

    // ===== 締め日 =====
    pub next_closing_date: NaiveDate,

    // ===== 告警 =====
    pub alerts: Vec<AlertItem>,
}

// ==========================================
// MetricsAggregator - 指标聚合器
// ==========================================
pub struct MetricsAggregator;

impl MetricsAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 计算驾驶舱快照（不改动存储）
    pub fn snapshot(&self, db: &Database, today: NaiveDate) -> DashboardSnapshot {
        let active_properties: Vec<&Property> = db
            .properties
            .iter()
            .filter(|p| p.is_active(today))
            .collect();

        let total_capacity: i64 = active_properties.iter().map(|p| p.capacity).sum();
        let occupancy_count = db.tenants.iter().filter(|t| t.is_active()).count();
        let occupancy_rate = if total_capacity > 0 {
            occupancy_count as f64 / total_capacity as f64
        } else {
            0.0
        };

        let total_collected: i64 = db
            .tenants
            .iter()
            .filter(|t| t.is_active())
            .map(|t| t.rent_contribution + t.parking_fee)
            .sum();
        let total_cost: i64 = active_properties
            .iter()
            .map(|p| p.rent_cost + p.parking_cost)
            .sum();
        let target_total: i64 = active_properties.iter().map(|p| p.rent_price_uns).sum();

        let mut alerts = Vec::new();
        self.collect_expiry_alerts(&active_properties, today, &mut alerts);
        self.collect_zero_rent_alert(db, &mut alerts);

        DashboardSnapshot {
            active_property_count: active_properties.len(),
            total_capacity,
            occupancy_count,
            occupancy_rate,
            total_collected,
            total_cost,
            target_total,
            profit: total_collected - total_cost,
            next_closing_date: next_closing_date(today, db.config.closing_day),
            alerts,
        }
    }

    /// 契约到期告警: 活跃物件の契約終了日まで 60 日以内
    fn collect_expiry_alerts(
        &self,
        active_properties: &[&Property],
        today: NaiveDate,
        alerts: &mut Vec<AlertItem>,
    ) {
        for property in active_properties {
            let end = match property.contract_end_parse() {
                DateParse::Valid(end) => end,
                // 缺失/不可解析按活跃处理，但没有日期就没有到期告警
                DateParse::Missing | DateParse::Unparseable => continue,
            };
            let days_left = (end - today).num_days();
            if days_left > EXPIRY_WARNING_DAYS {
                continue;
            }
            let severity = if days_left <= EXPIRY_HIGH_SEVERITY_DAYS {
                AlertSeverity::High
            } else {
                AlertSeverity::Medium
            };
            alerts.push(AlertItem {
                alert_type: AlertType::Warning,
                message: format!(
                    "物件「{}」契约将于 {} 天后到期",
                    property.name, days_left
                ),
                severity,
                timestamp: Utc::now(),
            });
        }
    }

    /// 零家賃告警: 家賃 0 円的在住入居者按人数聚合为一条（不逐人告警）
    fn collect_zero_rent_alert(&self, db: &Database, alerts: &mut Vec<AlertItem>) {
        let zero_rent_count = db
            .tenants
            .iter()
            .filter(|t| t.is_active() && t.rent_contribution == 0)
            .count();
        if zero_rent_count > 0 {
            alerts.push(AlertItem {
                alert_type: AlertType::Danger,
                message: format!("{} 名在住入居者的家賃为 0 円，请确认", zero_rent_count),
                severity: AlertSeverity::High,
                timestamp: Utc::now(),
            });
        }
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 締め日计算
// ==========================================

/// 下一个締め日（今天当天也算）
///
/// closing_day = 0 代表月末締め
pub fn next_closing_date(today: NaiveDate, closing_day: u8) -> NaiveDate {
    if closing_day == 0 {
        return end_of_month(today);
    }
    let day = closing_day as u32;
    if today.day() <= day {
        NaiveDate::from_ymd_opt(today.year(), today.month(), day).unwrap_or(today)
    } else if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, day).unwrap_or(today)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, day).unwrap_or(today)
    }
}

fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}
