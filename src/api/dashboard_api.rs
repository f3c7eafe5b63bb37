// ==========================================
// 賃貸管理システム - 仪表盘 API
// ==========================================
// 职责: 只读聚合，不修改数据库
// ==========================================

use chrono::{Local, NaiveDate};

use crate::domain::database::Database;
use crate::engine::metrics::{DashboardSnapshot, MetricsAggregator};

pub struct DashboardApi {
    aggregator: MetricsAggregator,
}

impl DashboardApi {
    pub fn new() -> Self {
        Self {
            aggregator: MetricsAggregator::new(),
        }
    }

    /// 以今天为基准日生成快照
    pub fn snapshot(&self, db: &Database) -> DashboardSnapshot {
        self.snapshot_at(db, Local::now().date_naive())
    }

    /// 以指定基准日生成快照（测试与月末核算用）
    pub fn snapshot_at(&self, db: &Database, today: NaiveDate) -> DashboardSnapshot {
        self.aggregator.snapshot(db, today)
    }
}

impl Default for DashboardApi {
    fn default() -> Self {
        Self::new()
    }
}
