// ==========================================
// 賃貸管理システム - 导入 API
// ==========================================
// 职责: 工作簿导入 + 合并入库，并向调用方推送通知
// 红线: 导入本身不触库，合并是唯一写入点
// ==========================================

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::api::error::ApiResult;
use crate::domain::database::Database;
use crate::domain::import::ImportOutcome;
use crate::engine::merge::{MergeEngine, MergeSummary};
use crate::importer::pipeline::ImportPipeline;
use crate::importer::workbook::WorkbookSource;
use crate::notify::{Notification, Notifier};

pub struct ImportApi {
    pipeline: ImportPipeline,
    merge_engine: MergeEngine,
    notifier: Arc<dyn Notifier>,
}

impl ImportApi {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            pipeline: ImportPipeline::new(),
            merge_engine: MergeEngine::new(),
            notifier,
        }
    }

    /// 处理工作簿：分类 → 校验 → 完整性检查
    ///
    /// 不修改数据库；结果需经 merge_import 合并后才落库
    #[instrument(skip(self, source))]
    pub fn process_workbook(&self, source: &dyn WorkbookSource) -> ApiResult<ImportOutcome> {
        let outcome = match self.pipeline.process_workbook(source) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.notifier
                    .notify(Notification::error(format!("导入失败: {}", e)));
                return Err(e.into());
            }
        };

        if outcome.success {
            self.notifier.notify(Notification::success(format!(
                "导入校验完成: {}",
                outcome.summary
            )));
        } else {
            self.notifier.notify(Notification::warning(format!(
                "导入存在 {} 处问题: {}",
                outcome.errors.len(),
                outcome.summary
            )));
        }
        Ok(outcome)
    }

    /// 合并导入结果到数据库（唯一写入点）
    #[instrument(skip(self, db, outcome), fields(batch_id = %outcome.batch_id))]
    pub fn merge_import(&self, db: &mut Database, outcome: &ImportOutcome) -> MergeSummary {
        let summary = self.merge_engine.merge(db, outcome);
        info!(
            added_properties = summary.added_properties,
            added_tenants = summary.added_tenants,
            added_employees = summary.added_employees,
            "合并完成"
        );
        if summary.skipped_tenants > 0 || summary.skipped_employees > 0 {
            warn!(
                skipped_tenants = summary.skipped_tenants,
                skipped_employees = summary.skipped_employees,
                "合并时跳过部分记录"
            );
        }
        self.notifier.notify(Notification::success(format!(
            "合并完成: 物件 {} 件 / 入居者 {} 件 / 社員 {} 件",
            summary.added_properties, summary.added_tenants, summary.added_employees
        )));
        summary
    }
}
