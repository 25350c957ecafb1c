// ==========================================
// PV 设计评审引擎 - BoM 表格模型
// ==========================================
// 职责: 列名自由、单元格类型异构的 BoM 表格
// 用途: 导入层写入,信号提取只读
// ==========================================

use serde::{Deserialize, Serialize};

/// 视为缺失值的单元格文本（大小写不敏感）
const MISSING_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null", "none"];

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// 从原始文本构造（TRIM + 缺失标记 + 数值推断）
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lowered = trimmed.to_lowercase();
        if MISSING_MARKERS.contains(&lowered.as_str()) {
            return CellValue::Empty;
        }

        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(v) => v.is_nan(),
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// 原样文本（用于错误信息与字符串字段）
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(v) => v.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(raw: &str) -> Self {
        CellValue::from_raw(raw)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

// ==========================================
// BomTable - BoM 表格
// ==========================================
// 行顺序即文件中的数据行顺序（表头除外）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl BomTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// 由文本行构造（测试与 CSV 导入共用）
    pub fn from_text_rows<S: AsRef<str>>(columns: &[S], rows: &[Vec<S>]) -> Self {
        let columns = columns.iter().map(|c| c.as_ref().trim().to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| CellValue::from_raw(cell.as_ref())).collect())
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列中第一个非缺失值
    ///
    /// # 返回
    /// - Some((row_number, value)): row_number 为 1 起始的数据行号
    /// - None: 列不存在或全部缺失
    pub fn first_present(&self, column_index: usize) -> Option<(usize, &CellValue)> {
        self.rows.iter().enumerate().find_map(|(idx, row)| {
            row.get(column_index)
                .filter(|cell| !cell.is_missing())
                .map(|cell| (idx + 1, cell))
        })
    }
}
