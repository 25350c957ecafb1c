// ==========================================
// PV 设计评审引擎 - Saudi / IEC 标准快照
// ==========================================
// 职责: 将前序检查结果组合为固定分类的"已覆盖 / 缺口"条目
// 红线: 缺口条目顺序有意义（先严重度后类别）,不得重排
// ==========================================

use crate::domain::types::CheckLevel;

/// 本系统无法从现有输入验证的事项,始终列为缺口
pub const STANDING_GAPS: [&str; 5] = [
    "Protection coordination (DC fuses/breakers, SPD type and ratings) not validated from current inputs.",
    "Labeling and isolation (DC isolators, emergency shutdown labels) require drawing confirmation.",
    "Cable sizing/derating (installation method, ambient, grouping) not validated from current inputs.",
    "Earthing/bonding continuity and conductor sizing not validated from current inputs.",
    "Fire safety routing and rooftop requirements require site/fire review.",
];

/// 标准快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardsSnapshot {
    pub compliant: Vec<String>,
    pub gaps: Vec<String>,
}

impl StandardsSnapshot {
    /// 组合快照
    ///
    /// # 参数
    /// - `climate_ok`: 冬季过电压检查是否通过
    /// - `consistency_level`: 一致性检查等级（PASS / INFO 视为已执行）
    pub fn build(climate_ok: bool, consistency_level: CheckLevel) -> Self {
        let mut compliant = Vec::new();
        let mut gaps = Vec::new();

        // ===== 组串电压 =====
        if climate_ok {
            compliant.push(
                "String sizing vs minimum temperature (overvoltage) check passed.".to_string(),
            );
            compliant
                .push("Inverter DC maximum verified against worst-case string Voc.".to_string());
        } else {
            gaps.push(
                "String sizing vs minimum temperature fails (overvoltage). Update design string length / MPPT allocation."
                    .to_string(),
            );
        }

        // ===== BoM ↔ SLD =====
        match consistency_level {
            CheckLevel::Pass | CheckLevel::Info => {
                compliant.push("BoM and SLD consistency check performed (best-effort).".to_string());
                if consistency_level == CheckLevel::Info {
                    gaps.push(
                        "SLD key signals not fully extracted. Provide native PDF (text) or enable OCR/Vision extraction."
                            .to_string(),
                    );
                }
            }
            CheckLevel::Warn | CheckLevel::Fail => {
                gaps.push("BoM and SLD values mismatch. Resolve before procurement/approval.".to_string());
            }
        }

        gaps.extend(STANDING_GAPS.iter().map(|s| s.to_string()));

        tracing::debug!(compliant = compliant.len(), gaps = gaps.len(), "标准快照生成");
        Self { compliant, gaps }
    }
}
