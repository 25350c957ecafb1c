// ==========================================
// PV 设计评审引擎 - 领域模型层
// ==========================================
// 职责: 定义评审用的值对象与数据契约
// 红线: 不含文件读取逻辑,不含评审规则
// ==========================================

pub mod bom_table;
pub mod check;
pub mod report;
pub mod signal;
pub mod types;

// 重导出核心类型
pub use bom_table::{BomTable, CellValue};
pub use check::{CheckStatus, ClimateNumbers, NumberValue};
pub use report::{ReviewPayload, SectionStatus};
pub use signal::{BomField, BomSignal, SldOutcome, SldSignal, SourceProvenance, ValueSource};
pub use types::CheckLevel;
