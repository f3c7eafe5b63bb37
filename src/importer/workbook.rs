// ==========================================
// 賃貸管理システム - 工作簿来源与行模型
// ==========================================
// 职责: 核心只消费已表格化的行（列名 → 单元格值），
//       不直接解析二进制电子表格；Excel/CSV 适配器在此就地提供
// 适配器: MemoryWorkbook（宿主直接投递行）/ ExcelWorkbook / CsvWorkbook
// ==========================================

use crate::importer::error::ImportError;
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// RawRow - 原始行（显式映射类型）
// ==========================================
// 任意列名查询一律走类型化访问器，返回 Option，绝不假定列存在
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由 (列名, 值) 序列构建（测试与宿主投递共用）
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (key, value) in pairs {
            row.insert(key.into(), value.into());
        }
        row
    }

    pub fn insert(&mut self, label: String, value: String) {
        self.cells.insert(label.trim().to_string(), value);
    }

    /// 取单元格（trim 后非空才算存在）
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .get(label)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 按别名列表依次查找（电子表格列名写法不一）
    pub fn get_any(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|label| self.get(label))
    }

    /// 原始单元格全集（社員 full_data 审计留存用）
    pub fn cells(&self) -> &HashMap<String, String> {
        &self.cells
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }
}

// ==========================================
// WorkbookSource Trait - 工作簿来源（外部协作者接口）
// ==========================================
pub trait WorkbookSource {
    /// 有序工作表名列表
    fn sheet_names(&self) -> Vec<String>;

    /// 读取指定工作表的全部数据行
    fn sheet_rows(&self, name: &str) -> Result<Vec<RawRow>, ImportError>;
}

// ==========================================
// MemoryWorkbook - 已表格化行的直接投递
// ==========================================
// 规范形态: 宿主自行表格化后经此交给核心；同时是测试载体
#[derive(Debug, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, Vec<RawRow>)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sheet(&mut self, name: impl Into<String>, rows: Vec<RawRow>) {
        self.sheets.push((name.into(), rows));
    }
}

impl WorkbookSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn sheet_rows(&self, name: &str) -> Result<Vec<RawRow>, ImportError> {
        self.sheets
            .iter()
            .find(|(sheet, _)| sheet == name)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| ImportError::SheetNotFound(name.to_string()))
    }
}

// ==========================================
// ExcelWorkbook - calamine 适配器（.xlsx）
// ==========================================
// 打开时一次性表格化全部工作表；失败按「工作簿不可用」处理
pub struct ExcelWorkbook {
    sheets: Vec<(String, Vec<RawRow>)>,
}

impl ExcelWorkbook {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| {
            ImportError::WorkbookUnavailable(format!("Excel 打开失败: {}", e))
        })?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::WorkbookUnavailable(
                "Excel 文件无工作表".to_string(),
            ));
        }

        let mut sheets = Vec::new();
        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

            // 表头（第一行）+ 数据行
            let mut rows_iter = range.rows();
            let headers: Vec<String> = match rows_iter.next() {
                Some(header_row) => header_row
                    .iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect(),
                None => {
                    sheets.push((sheet_name, Vec::new()));
                    continue;
                }
            };

            let mut rows = Vec::new();
            for data_row in rows_iter {
                let mut row = RawRow::new();
                for (col_idx, cell) in data_row.iter().enumerate() {
                    if let Some(header) = headers.get(col_idx) {
                        if !header.is_empty() {
                            row.insert(header.clone(), cell.to_string().trim().to_string());
                        }
                    }
                }
                // 跳过完全空白的行
                if row.is_blank() {
                    continue;
                }
                rows.push(row);
            }
            sheets.push((sheet_name, rows));
        }

        Ok(Self { sheets })
    }
}

impl WorkbookSource for ExcelWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn sheet_rows(&self, name: &str) -> Result<Vec<RawRow>, ImportError> {
        self.sheets
            .iter()
            .find(|(sheet, _)| sheet == name)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| ImportError::SheetNotFound(name.to_string()))
    }
}

// ==========================================
// CsvWorkbook - csv 适配器（单工作表）
// ==========================================
// 工作表名取文件主名（分类器据此识别导入类型）
pub struct CsvWorkbook {
    sheet_name: String,
    rows: Vec<RawRow>,
}

impl CsvWorkbook {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let sheet_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("CSV")
            .to_string();

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = RawRow::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    if !header.is_empty() {
                        row.insert(header.clone(), value.trim().to_string());
                    }
                }
            }
            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        Ok(Self { sheet_name, rows })
    }
}

impl WorkbookSource for CsvWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        vec![self.sheet_name.clone()]
    }

    fn sheet_rows(&self, name: &str) -> Result<Vec<RawRow>, ImportError> {
        if name == self.sheet_name {
            Ok(self.rows.clone())
        } else {
            Err(ImportError::SheetNotFound(name.to_string()))
        }
    }
}
