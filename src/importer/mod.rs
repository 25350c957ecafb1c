// ==========================================
// PV 设计评审引擎 - 导入层
// ==========================================
// 职责: 外部 BoM 文件 → BomTable,列名映射,类型转换
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{aliases_for, find_column, FieldMapper, MappedValue};
pub use file_parser::{CsvParser, ExcelParser, FileParser, UniversalFileParser};
