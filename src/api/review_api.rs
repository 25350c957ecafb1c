// ==========================================
// PV 设计评审引擎 - 评审 API
// ==========================================
// 职责: 供外部交互壳调用的评审入口（文件路径 / 内存数据）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ReviewConfig};
use crate::domain::bom_table::BomTable;
use crate::engine::orchestrator::{ReviewOrchestrator, ReviewOutcome};
use crate::importer::UniversalFileParser;
use crate::report::render_text;
use std::path::Path;

pub struct ReviewApi {
    orchestrator: ReviewOrchestrator,
}

impl ReviewApi {
    pub fn new(config: ReviewConfig) -> ApiResult<Self> {
        Ok(Self {
            orchestrator: ReviewOrchestrator::new(config)?,
        })
    }

    pub fn from_config_manager(manager: &ConfigManager) -> ApiResult<Self> {
        Self::new(manager.review_config()?)
    }

    pub fn with_orchestrator(orchestrator: ReviewOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// 对内存中的输入执行评审
    pub fn review(
        &self,
        table: &BomTable,
        sld_document: &[u8],
        tmin: f64,
        place: Option<&str>,
    ) -> ApiResult<ReviewOutcome> {
        if !tmin.is_finite() {
            return Err(ApiError::InvalidInput(format!("Tmin 必须为有限数值: {}", tmin)));
        }
        if table.columns().is_empty() {
            return Err(ApiError::InvalidInput("BoM 表格没有列".to_string()));
        }

        Ok(self.orchestrator.run(table, sld_document, tmin, place)?)
    }

    /// 从文件执行评审
    ///
    /// # 参数
    /// - `bom_path`: BoM 文件（.csv / .xlsx / .xls）
    /// - `sld_path`: SLD 文档（PDF）
    pub fn review_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        bom_path: P,
        sld_path: Q,
        tmin: f64,
        place: Option<&str>,
    ) -> ApiResult<ReviewOutcome> {
        let table = UniversalFileParser.parse(bom_path)?;

        let sld_path = sld_path.as_ref();
        let sld_document = std::fs::read(sld_path).map_err(|e| ApiError::DocumentReadError {
            path: sld_path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(sld = %sld_path.display(), bytes = sld_document.len(), "开始评审");
        self.review(&table, &sld_document, tmin, place)
    }

    /// 报告载荷 JSON
    pub fn payload_json(outcome: &ReviewOutcome) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(&outcome.payload)?)
    }

    /// 文本报告
    pub fn text_report(outcome: &ReviewOutcome) -> String {
        render_text(&outcome.payload)
    }
}
