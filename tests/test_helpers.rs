// ==========================================
// 测试辅助函数
// ==========================================
// 共享的 BoM 表格构造 / 固定文本提取器
// ==========================================

#![allow(dead_code)]

use pv_design_review::config::ReviewConfig;
use pv_design_review::engine::{ReviewOrchestrator, TextExtractionError, TextExtractor};
use pv_design_review::BomTable;

/// 返回固定文本的提取器
pub struct FixedTextExtractor(pub String);

impl TextExtractor for FixedTextExtractor {
    fn extract_text(&self, _: &[u8], _: usize) -> Result<String, TextExtractionError> {
        Ok(self.0.clone())
    }
}

/// 总是失败的提取器
pub struct FailingTextExtractor;

impl TextExtractor for FailingTextExtractor {
    fn extract_text(&self, _: &[u8], _: usize) -> Result<String, TextExtractionError> {
        Err(TextExtractionError::InvalidDocument("xref table missing".to_string()))
    }
}

/// 标准 BoM: Voc 49.5 / -0.29 %/°C / 指定 MPS / 1100 V
pub fn standard_bom(modules_per_string: u32) -> BomTable {
    let mps = modules_per_string.to_string();
    BomTable::from_text_rows(
        &["Item", "Voc_STC", "TempCoeff", "MPS", "Inverter_Vmax", "Inverter"],
        &[
            vec!["PV module 550W", "49.5", "-0.29", mps.as_str(), "", ""],
            vec!["Inverter", "", "", "", "1100", "SUN2000-100KTL"],
        ],
    )
}

/// SLD 文本固定的编排器
pub fn orchestrator_with_text(text: &str) -> ReviewOrchestrator {
    ReviewOrchestrator::with_text_extractor(
        ReviewConfig::default(),
        Box::new(FixedTextExtractor(text.to_string())),
    )
    .expect("Failed to build orchestrator")
}

pub const FIXED_DATE: &str = "2026-10-14 09:30";
