// ==========================================
// PV 设计评审引擎 - BoM 文件解析器实现
// ==========================================
// 阶段: 文件读取与解析 → BomTable
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::domain::bom_table::{BomTable, CellValue};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为 BoM 表格（首行为表头,完全空白的行跳过）
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<BomTable>;
}

/// 检查文件存在
fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意读取源解析 CSV
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<BomTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::EmptyTable("CSV 无表头".to_string()));
        }

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<CellValue> = record.iter().map(CellValue::from_raw).collect();

            // 跳过完全空白的行
            if row.iter().all(|c| c.is_missing()) {
                continue;
            }

            rows.push(row);
        }

        Ok(BomTable::new(headers, rows))
    }
}

impl FileParser for CsvParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<BomTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    fn cell_value(cell: &Data) -> CellValue {
        match cell {
            Data::Int(v) => CellValue::Number(*v as f64),
            Data::Float(v) => CellValue::Number(*v),
            Data::String(s) => CellValue::from_raw(s),
            Data::Empty | Data::Error(_) => CellValue::Empty,
            other => CellValue::Text(other.to_string().trim().to_string()),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<BomTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开工作簿（按扩展名自动识别格式）
        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows_iter = range.rows();
        let header_row = rows_iter
            .next()
            .ok_or_else(|| ImportError::EmptyTable(format!("工作表 {} 无数据行", sheet_name)))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 读取数据行
        let mut rows = Vec::new();
        for data_row in rows_iter {
            let row: Vec<CellValue> = data_row.iter().map(Self::cell_value).collect();

            // 跳过完全空白的行
            if row.iter().all(|c| c.is_missing()) {
                continue;
            }

            rows.push(row);
        }

        Ok(BomTable::new(headers, rows))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<BomTable> {
        let path = file_path.as_ref();

        let table = match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_table(path)?,
            "xlsx" | "xls" => ExcelParser.parse_to_table(path)?,
            other => return Err(ImportError::UnsupportedFormat(other.to_string())),
        };

        tracing::debug!(
            path = %path.display(),
            columns = table.columns().len(),
            rows = table.row_count(),
            "BoM 文件解析完成"
        );
        Ok(table)
    }
}
