// ==========================================
// PV 设计评审引擎 - 引擎层
// ==========================================
// 职责: 评审规则管线（信号提取 → 交叉校验 → 物理模型 → 快照汇总）
// 红线: 引擎不读文件,所有规则必须输出可读的发现条目
// ==========================================

pub mod bom_signal;
pub mod climate_voltage;
pub mod consistency;
pub mod orchestrator;
pub mod report_payload;
pub mod sld_signal;
pub mod standards;

// 重导出核心引擎
pub use bom_signal::{normalize_temp_coeff, BomSignalExtractor};
pub use climate_voltage::{
    calc_voc_cold, suggest_modules_per_string, ClimateCheck, ClimateVoltageEngine,
};
pub use consistency::ConsistencyChecker;
pub use orchestrator::{ReviewOrchestrator, ReviewOutcome};
pub use report_payload::{now_date_str, ReviewContext, ReviewPayloadAssembler};
pub use sld_signal::{PdfTextExtractor, SldSignalExtractor, TextExtractionError, TextExtractor};
pub use standards::{StandardsSnapshot, STANDING_GAPS};
