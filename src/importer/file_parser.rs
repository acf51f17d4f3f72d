// ==========================================
// 批次腌制排产系统 - 文件解析器
// ==========================================
// 支持: Excel (.xlsx) / CSV (.csv)
// 输出: 表头 + 原始行（列名 → 去空白后的文本）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 单行原始数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 数据行序号（1-based，不含表头，空白行也计数）
    pub row_number: usize,
    pub values: HashMap<String, String>,
}

/// 解析后的原始表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// 按表头组装一行；完全空白的行不收录
    fn push_row<I>(&mut self, row_number: usize, cells: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut values = HashMap::new();
        for (col_idx, value) in cells.into_iter().enumerate() {
            if let Some(header) = self.headers.get(col_idx) {
                values.insert(header.clone(), value.trim().to_string());
            }
        }

        // 跳过完全空白的行
        if values.values().all(|v| v.is_empty()) {
            return;
        }
        self.rows.push(RawRow { row_number, values });
    }
}

fn check_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse(&self, path: &Path) -> ImportResult<RawTable> {
        check_exists(path)?;

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut table = RawTable {
            headers: reader
                .headers()?
                .iter()
                .map(|h| h.trim().to_string())
                .collect(),
            rows: Vec::new(),
        };

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            table.push_row(row_idx + 1, record.iter().map(str::to_string));
        }

        Ok(table)
    }
}

// ==========================================
// Excel Parser（第一个工作表）
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    pub fn parse(&self, path: &Path) -> ImportResult<RawTable> {
        check_exists(path)?;

        let mut workbook: Xlsx<_> = open_workbook(path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let mut table = RawTable {
            headers: header_row
                .iter()
                .map(|cell| cell_to_string(cell).trim().to_string())
                .collect(),
            rows: Vec::new(),
        };

        for (row_idx, data_row) in rows.enumerate() {
            table.push_row(row_idx + 1, data_row.iter().map(cell_to_string));
        }

        Ok(table)
    }
}

/// 单元格转文本；日期单元格输出 Excel 序列号，由字段映射统一解析
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse(path),
            "xlsx" => ExcelParser.parse(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
