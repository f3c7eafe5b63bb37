// ==========================================
// 賃貸管理システム - 导入层
// ==========================================
// 职责: 外部表格数据 → 类型化候选集（含行级错误清单）
// 流程: 工作簿来源 → 分类 → 行校验 → 候选图 → 完整性折入
// ==========================================

pub mod error;
pub mod pipeline;
pub mod row_validator;
pub mod sheet_classifier;
pub mod workbook;

// 重导出核心类型
pub use error::ImportError;
pub use pipeline::ImportPipeline;
pub use row_validator::{
    coerce_amount, FieldViolation, PropertyDraft, RowValidator, TenantDraft,
};
pub use sheet_classifier::classify;
pub use workbook::{CsvWorkbook, ExcelWorkbook, MemoryWorkbook, RawRow, WorkbookSource};
