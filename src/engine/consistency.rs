// ==========================================
// PV 设计评审引擎 - BoM ↔ SLD 一致性检查
// ==========================================
// 规则: 两个字段独立比较,严重度 WARN（不一致）> INFO（未检出）> PASS
// 说明: SLD 未检出信号不是设计缺陷,只降级为 INFO
// ==========================================

use crate::config::ReviewConfig;
use crate::domain::check::CheckStatus;
use crate::domain::signal::{BomSignal, SldSignal};
use crate::domain::types::CheckLevel;

pub const CONSISTENCY_TITLE: &str = "BoM ↔ SLD consistency";

pub struct ConsistencyChecker {
    vmax_epsilon_v: f64,
}

impl ConsistencyChecker {
    pub fn new(config: &ReviewConfig) -> Self {
        Self {
            vmax_epsilon_v: config.vmax_epsilon_v,
        }
    }

    /// 比较 BoM 与 SLD 信号
    pub fn compare(&self, bom: &BomSignal, sld: &SldSignal) -> CheckStatus {
        let mut mismatches = Vec::new();
        let mut gaps = Vec::new();

        // ===== 逆变器直流最大电压 =====
        match sld.inverter_vmax {
            None => gaps.push("Inverter DC max voltage not detected in SLD.".to_string()),
            Some(sld_vmax) => {
                if (bom.inverter_vmax - sld_vmax).abs() > self.vmax_epsilon_v {
                    mismatches.push(format!(
                        "Inverter DC max differs (BoM {:.0} V vs SLD {:.0} V).",
                        bom.inverter_vmax, sld_vmax
                    ));
                }
            }
        }

        // ===== 每串组件数 =====
        match sld.modules_per_string {
            None => gaps.push("Modules/string not detected in SLD.".to_string()),
            Some(sld_mps) => {
                if bom.modules_per_string != sld_mps {
                    mismatches.push(format!(
                        "Modules/string differs (BoM {} vs SLD {}).",
                        bom.modules_per_string, sld_mps
                    ));
                }
            }
        }

        let status = if !mismatches.is_empty() {
            CheckStatus::new(CheckLevel::Warn, CONSISTENCY_TITLE, mismatches)
        } else if !gaps.is_empty() {
            gaps.push(
                "If SLD is scanned, OCR/Vision is needed for reliable extraction.".to_string(),
            );
            CheckStatus::new(CheckLevel::Info, CONSISTENCY_TITLE, gaps)
        } else {
            CheckStatus::new(
                CheckLevel::Pass,
                CONSISTENCY_TITLE,
                vec!["BoM values match the detected SLD signals.".to_string()],
            )
        };

        tracing::info!(level = %status.level, findings = status.details.len(), "一致性检查完成");
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signal::{SldOutcome, SourceProvenance, ValueSource};

    fn bom(vmax: f64, mps: u32) -> BomSignal {
        BomSignal {
            voc_stc: 49.5,
            temp_coeff: -0.0029,
            modules_per_string: mps,
            inverter_vmax: vmax,
            inverter_name: "INV".to_string(),
            source_provenance: SourceProvenance {
                voc_stc: ValueSource::Default,
                temp_coeff: ValueSource::Default,
                modules_per_string: ValueSource::Default,
                inverter_vmax: ValueSource::Default,
                inverter_name: ValueSource::Default,
            },
        }
    }

    fn sld(vmax: Option<f64>, mps: Option<u32>) -> SldSignal {
        SldSignal {
            inverter_vmax: vmax,
            modules_per_string: mps,
            notes: SldOutcome::Extracted.note(),
            outcome: SldOutcome::Extracted,
        }
    }

    fn checker() -> ConsistencyChecker {
        ConsistencyChecker::new(&ReviewConfig::default())
    }

    #[test]
    fn test_all_match_is_pass() {
        let status = checker().compare(&bom(1100.0, 22), &sld(Some(1100.0), Some(22)));
        assert_eq!(status.level, CheckLevel::Pass);
        assert_eq!(status.title, CONSISTENCY_TITLE);
        assert_eq!(status.details, vec!["BoM values match the detected SLD signals."]);
    }

    #[test]
    fn test_mismatch_wins_over_gap() {
        let status = checker().compare(&bom(1100.0, 22), &sld(Some(1500.0), None));
        assert_eq!(status.level, CheckLevel::Warn);
        assert_eq!(
            status.details,
            vec!["Inverter DC max differs (BoM 1100 V vs SLD 1500 V)."]
        );
    }

    #[test]
    fn test_gaps_only_is_info_with_ocr_note() {
        let status = checker().compare(&bom(1100.0, 22), &sld(None, None));
        assert_eq!(status.level, CheckLevel::Info);
        assert_eq!(status.details.len(), 3);
        assert!(status.details[2].contains("OCR/Vision"));
    }

    #[test]
    fn test_voltage_within_epsilon_matches() {
        let status = checker().compare(&bom(1100.0, 22), &sld(Some(1100.0000001), Some(22)));
        assert_eq!(status.level, CheckLevel::Pass);
    }

    #[test]
    fn test_both_mismatches_reported_in_order() {
        let status = checker().compare(&bom(1000.0, 22), &sld(Some(1100.0), Some(20)));
        assert_eq!(status.level, CheckLevel::Warn);
        assert_eq!(status.details.len(), 2);
        assert_eq!(status.details[1], "Modules/string differs (BoM 22 vs SLD 20).");
    }
}
