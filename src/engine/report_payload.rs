// ==========================================
// PV 设计评审引擎 - 报告载荷组装
// ==========================================
// 职责: 检查结果 + 项目/站点元数据 → ReviewPayload
// 红线: 仅做字段映射,不做计算; 每个键都必须存在
// ==========================================

use crate::domain::check::CheckStatus;
use crate::domain::report::{ReviewPayload, SectionStatus};
use crate::domain::types::CheckLevel;
use crate::engine::climate_voltage::ClimateCheck;
use crate::engine::standards::StandardsSnapshot;
use chrono::Local;

/// 报告时间戳格式
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 当前本地时间字符串
pub fn now_date_str() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// 项目 / 站点元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewContext {
    pub project_name: String,
    pub place: String,
}

pub struct ReviewPayloadAssembler;

impl ReviewPayloadAssembler {
    /// 组装报告载荷
    ///
    /// # 参数
    /// - `consistency`: 一致性检查原始结果（写入摘要节）
    /// - `bom_status`: 汇总口径下的一致性等级
    /// - `climate`: 冬季过电压检查结果
    /// - `snapshot`: 标准快照
    pub fn assemble(
        context: &ReviewContext,
        date_str: String,
        consistency: &CheckStatus,
        bom_status: CheckLevel,
        climate: &ClimateCheck,
        snapshot: &StandardsSnapshot,
    ) -> ReviewPayload {
        ReviewPayload {
            project_name: context.project_name.clone(),
            place: context.place.clone(),
            date_str,
            numbers: climate.numbers.clone(),
            bom_status,
            climate_status: climate.status.level,
            section_status: vec![
                SectionStatus::from(consistency),
                SectionStatus::from(&climate.status),
            ],
            compliant: snapshot.compliant.clone(),
            gaps: snapshot.gaps.clone(),
            recommendations: climate.recommendations.clone(),
        }
    }
}
