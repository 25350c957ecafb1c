// ==========================================
// PV 设计评审引擎 - 评审编排器
// ==========================================
// 流程: BoM 提取 → SLD 提取 → 一致性检查 → 冬季过电压 → 标准快照 → 报告载荷
// 红线: 三个输入的纯函数; 无共享可变状态,可重复 / 并发调用
//       硬错误整体中止,不返回部分结果
// ==========================================

use crate::config::ReviewConfig;
use crate::domain::bom_table::BomTable;
use crate::domain::check::{CheckStatus, ClimateNumbers};
use crate::domain::report::ReviewPayload;
use crate::domain::signal::{BomSignal, SldSignal};
use crate::domain::types::CheckLevel;
use crate::engine::bom_signal::BomSignalExtractor;
use crate::engine::climate_voltage::ClimateVoltageEngine;
use crate::engine::consistency::ConsistencyChecker;
use crate::engine::report_payload::{now_date_str, ReviewContext, ReviewPayloadAssembler};
use crate::engine::sld_signal::{SldSignalExtractor, TextExtractor};
use crate::engine::standards::StandardsSnapshot;
use crate::importer::error::ImportResult;
use tracing::instrument;

/// 一次评审的完整结果
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub bom_signal: BomSignal,
    pub sld_signal: SldSignal,
    pub consistency: CheckStatus,
    /// 汇总 / 展示口径下的一致性等级
    pub consistency_display_level: CheckLevel,
    pub climate: CheckStatus,
    pub numbers: ClimateNumbers,
    pub recommendations: Vec<String>,
    pub payload: ReviewPayload,
}

// ==========================================
// ReviewOrchestrator
// ==========================================
pub struct ReviewOrchestrator {
    config: ReviewConfig,
    bom_extractor: BomSignalExtractor,
    sld_extractor: SldSignalExtractor,
    consistency_checker: ConsistencyChecker,
    climate_engine: ClimateVoltageEngine,
}

impl ReviewOrchestrator {
    /// 使用 PDF 文本提取构建
    pub fn new(config: ReviewConfig) -> ImportResult<Self> {
        let sld_extractor = SldSignalExtractor::new(&config)?;
        Ok(Self::assemble(config, sld_extractor))
    }

    /// 使用自定义文本提取能力构建
    pub fn with_text_extractor(
        config: ReviewConfig,
        text_extractor: Box<dyn TextExtractor>,
    ) -> ImportResult<Self> {
        let sld_extractor = SldSignalExtractor::with_text_extractor(&config, text_extractor)?;
        Ok(Self::assemble(config, sld_extractor))
    }

    fn assemble(config: ReviewConfig, sld_extractor: SldSignalExtractor) -> Self {
        Self {
            bom_extractor: BomSignalExtractor::new(&config),
            consistency_checker: ConsistencyChecker::new(&config),
            climate_engine: ClimateVoltageEngine::new(&config),
            sld_extractor,
            config,
        }
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// 执行评审（时间戳取当前时间）
    pub fn run(
        &self,
        table: &BomTable,
        sld_document: &[u8],
        tmin: f64,
        place: Option<&str>,
    ) -> ImportResult<ReviewOutcome> {
        self.run_at(table, sld_document, tmin, place, now_date_str())
    }

    /// 执行评审（指定时间戳）
    #[instrument(skip(self, table, sld_document, date_str), fields(rows = table.row_count()))]
    pub fn run_at(
        &self,
        table: &BomTable,
        sld_document: &[u8],
        tmin: f64,
        place: Option<&str>,
        date_str: String,
    ) -> ImportResult<ReviewOutcome> {
        // 1. 信号提取
        let bom_signal = self.bom_extractor.extract(table)?;
        let sld_signal = self.sld_extractor.extract(sld_document);

        // 2. BoM ↔ SLD
        let consistency = self.consistency_checker.compare(&bom_signal, &sld_signal);
        let consistency_display_level = if self.config.collapse_info_for_aggregation {
            consistency.level.for_aggregation()
        } else {
            consistency.level
        };

        // 3. 冬季过电压（与 SLD 无关）
        let climate_check = self.climate_engine.check(&bom_signal, tmin);

        // 4. 标准快照
        let snapshot =
            StandardsSnapshot::build(climate_check.status.is_pass(), consistency_display_level);

        // 5. 报告载荷
        let context = ReviewContext {
            project_name: self.config.project_name.clone(),
            place: place
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(self.config.default_site_label.as_str())
                .to_string(),
        };
        let payload = ReviewPayloadAssembler::assemble(
            &context,
            date_str,
            &consistency,
            consistency_display_level,
            &climate_check,
            &snapshot,
        );

        tracing::info!(
            consistency = %consistency.level,
            climate = %climate_check.status.level,
            gaps = payload.gaps.len(),
            "评审完成"
        );

        Ok(ReviewOutcome {
            bom_signal,
            sld_signal,
            consistency,
            consistency_display_level,
            climate: climate_check.status,
            numbers: climate_check.numbers,
            recommendations: climate_check.recommendations,
            payload,
        })
    }
}
