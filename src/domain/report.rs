// ==========================================
// PV 设计评审引擎 - 报告载荷领域模型
// ==========================================
// 职责: 交给报告渲染方的数据契约
// 红线: 渲染方无条件读取每个键,空值用空列表表示,不得缺键
// ==========================================

use crate::domain::check::{CheckStatus, ClimateNumbers};
use crate::domain::types::CheckLevel;
use serde::{Deserialize, Serialize};

/// 报告摘要中的一节
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionStatus {
    pub title: String,
    pub level: CheckLevel,
    pub details: Vec<String>,
}

impl From<&CheckStatus> for SectionStatus {
    fn from(status: &CheckStatus) -> Self {
        Self {
            title: status.title.clone(),
            level: status.level,
            details: status.details.clone(),
        }
    }
}

// ==========================================
// ReviewPayload - 报告载荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub project_name: String,
    pub place: String,    // 站点标签
    pub date_str: String, // 生成时间 (YYYY-MM-DD HH:MM)
    pub numbers: ClimateNumbers,
    pub bom_status: CheckLevel,     // 一致性等级（汇总口径）
    pub climate_status: CheckLevel, // 气候电压等级
    pub section_status: Vec<SectionStatus>,
    pub compliant: Vec<String>,
    pub gaps: Vec<String>,
    pub recommendations: Vec<String>,
}
