// ==========================================
// 賃貸管理システム - 导入管道
// ==========================================
// 流程: 分类 → 定位工作表 → 逐行校验 → 候选集 → 完整性检查折入
// 红线: 尽力收集器 —— 单行失败只记错不中断，部分成功是常态；
//       入居行按物件名与「本次解析出的」物件候选精确匹配，
//       绝不查规范存储，也绝不放任孤儿入居者
// ==========================================

use crate::domain::import::{ImportOutcome, RowError};
use crate::domain::types::ImportKind;
use crate::engine::integrity::IntegrityChecker;
use crate::importer::error::ImportError;
use crate::importer::row_validator::{
    PropertyDraft, RowValidator, TenantDraft, COL_PROPERTY_NAME,
};
use crate::importer::sheet_classifier::{
    classify, find_sheet, EMPLOYEE_SHEET_TOKENS, PROPERTY_SHEET_TOKENS, TENANT_SHEET_TOKENS,
};
use crate::importer::workbook::WorkbookSource;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// ImportPipeline - 导入管道（两个变体共用行校验器）
// ==========================================
pub struct ImportPipeline {
    validator: RowValidator,
}

impl ImportPipeline {
    pub fn new() -> Self {
        Self {
            validator: RowValidator::new(),
        }
    }

    /// 处理一个工作簿: 分类后分派到对应管道
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 含候选集与可枚举错误列表（部分成功一等公民）
    /// - Err(ImportError): 仅当工作簿本身不可用
    #[instrument(skip(self, source))]
    pub fn process_workbook(
        &self,
        source: &dyn WorkbookSource,
    ) -> Result<ImportOutcome, ImportError> {
        let batch_id = Uuid::new_v4().to_string();
        let sheet_names = source.sheet_names();
        let kind = classify(&sheet_names);

        info!(batch_id = %batch_id, kind = %kind, sheets = ?sheet_names, "开始导入解析");

        let outcome = match kind {
            ImportKind::EmployeeImport => self.run_employee(batch_id, source, &sheet_names)?,
            ImportKind::RentManagementImport => {
                self.run_rent_management(batch_id, source, &sheet_names)?
            }
            // 无法识别: 零候选的失败结果，正常返回而非报错
            ImportKind::Unrecognized => ImportOutcome::unrecognized(batch_id, &sheet_names),
        };

        info!(
            batch_id = %outcome.batch_id,
            success = outcome.success,
            candidates = outcome.candidate_count(),
            errors = outcome.errors.len(),
            "导入解析结束"
        );
        Ok(outcome)
    }

    // ==========================================
    // 社員名簿管道
    // ==========================================
    fn run_employee(
        &self,
        batch_id: String,
        source: &dyn WorkbookSource,
        sheet_names: &[String],
    ) -> Result<ImportOutcome, ImportError> {
        let mut outcome = ImportOutcome::new(batch_id, ImportKind::EmployeeImport);

        // 分类已命中，名簿工作表必然存在
        let sheet = find_sheet(sheet_names, EMPLOYEE_SHEET_TOKENS)
            .ok_or_else(|| ImportError::InternalError("社員名簿工作表定位失败".to_string()))?;
        let rows = source.sheet_rows(sheet)?;
        debug!(sheet = sheet, rows = rows.len(), "解析社員名簿工作表");

        for (idx, row) in rows.iter().enumerate() {
            let row_index = idx + 1;
            match self.validator.validate_employee(row) {
                Ok(employee) => outcome.employees.push(employee),
                // 模式无效的行只被排除，不中断后续行
                Err(violations) => {
                    for v in violations {
                        outcome.errors.push(RowError {
                            row_index,
                            field: v.field,
                            message: v.message,
                        });
                    }
                }
            }
        }

        outcome.success = outcome.errors.is_empty();
        outcome.summary = format!(
            "社員名簿解析完成: 候选 {} 条, 错误 {} 条",
            outcome.employees.len(),
            outcome.errors.len()
        );
        Ok(outcome)
    }

    // ==========================================
    // 賃貸管理管道（物件 + 入居者）
    // ==========================================
    fn run_rent_management(
        &self,
        batch_id: String,
        source: &dyn WorkbookSource,
        sheet_names: &[String],
    ) -> Result<ImportOutcome, ImportError> {
        let mut outcome = ImportOutcome::new(batch_id, ImportKind::RentManagementImport);

        // === 步骤 1: 物件工作表（可缺失） ===
        if let Some(sheet) = find_sheet(sheet_names, PROPERTY_SHEET_TOKENS) {
            let rows = source.sheet_rows(sheet)?;
            debug!(sheet = sheet, rows = rows.len(), "解析物件工作表");

            for (idx, row) in rows.iter().enumerate() {
                let row_index = idx + 1;
                match self.validator.validate_property(&PropertyDraft::from_row(row)) {
                    Ok(mut property) => {
                        // 本次导入域内的临时顺序 id（合并时重铸）
                        property.id = outcome.properties.len() as i64 + 1;
                        outcome.properties.push(property);
                    }
                    Err(violations) => {
                        for v in violations {
                            outcome.errors.push(RowError {
                                row_index,
                                field: v.field,
                                message: v.message,
                            });
                        }
                    }
                }
            }
        }

        // === 步骤 2: 入居工作表（可缺失） ===
        if let Some(sheet) = find_sheet(sheet_names, TENANT_SHEET_TOKENS) {
            let rows = source.sheet_rows(sheet)?;
            debug!(sheet = sheet, rows = rows.len(), "解析入居工作表");

            for (idx, row) in rows.iter().enumerate() {
                let row_index = idx + 1;

                // 按物件名与本次候选精确匹配（不查规范存储）
                let property_name = match row.get_any(COL_PROPERTY_NAME) {
                    Some(name) => name,
                    None => {
                        outcome.errors.push(RowError {
                            row_index,
                            field: "ｱﾊﾟｰﾄ".to_string(),
                            message: "入居行未填写物件名，无法关联物件".to_string(),
                        });
                        continue;
                    }
                };
                let matched = outcome
                    .properties
                    .iter()
                    .find(|p| p.name == property_name);
                let temp_property_id = match matched {
                    Some(property) => property.id,
                    None => {
                        // 硬性行级错误，绝不静默落成孤儿
                        outcome.errors.push(RowError {
                            row_index,
                            field: "ｱﾊﾟｰﾄ".to_string(),
                            message: format!("未找到对应物件: {}", property_name),
                        });
                        continue;
                    }
                };

                let mut draft = TenantDraft::from_row(row);
                draft.property_id = Some(temp_property_id.to_string());
                match self.validator.validate_tenant(&draft) {
                    Ok(tenant) => outcome.tenants.push(tenant),
                    Err(violations) => {
                        for v in violations {
                            outcome.errors.push(RowError {
                                row_index,
                                field: v.field,
                                message: v.message,
                            });
                        }
                    }
                }
            }
        }

        // === 步骤 3: 候选集完整性检查，结论折入错误列表 ===
        let report = IntegrityChecker::new().check(&outcome.properties, &outcome.tenants);
        for error in report.errors {
            outcome.errors.push(RowError {
                row_index: 0,
                field: error.kind.to_string(),
                message: error.message,
            });
        }

        outcome.success = outcome.errors.is_empty();
        outcome.summary = format!(
            "賃貸管理解析完成: 物件 {} 条, 入居者 {} 条, 错误 {} 条",
            outcome.properties.len(),
            outcome.tenants.len(),
            outcome.errors.len()
        );
        Ok(outcome)
    }
}

impl Default for ImportPipeline {
    fn default() -> Self {
        Self::new()
    }
}
