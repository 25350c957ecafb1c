// ==========================================
// PV 设计评审引擎 - 冬季过电压检查
// ==========================================
// 模型: Voc_cold = Voc_STC × (1 + |温度系数| × (T_ref − Tmin))
//       组串电压 = Voc_cold × 每串组件数
// 判定: 组串电压 ≤ 逆变器直流最大电压 → PASS（等于可接受）
// 红线: 纯函数,确定性,不报错
// ==========================================

use crate::config::ReviewConfig;
use crate::domain::check::{CheckStatus, ClimateNumbers};
use crate::domain::signal::BomSignal;
use crate::domain::types::CheckLevel;
use tracing::instrument;

pub const CLIMATE_TITLE: &str = "Winter overvoltage risk";

/// 标准测试条件参考温度 (°C)
pub const STC_REFERENCE_TEMP_C: f64 = 25.0;

/// 计算 Tmin 下的组件开路电压
///
/// 温度系数只取绝对值: 温度低于参考温度时电压升高
pub fn calc_voc_cold(voc_stc: f64, temp_coeff: f64, tmin: f64) -> f64 {
    calc_voc_cold_with_reference(voc_stc, temp_coeff, tmin, STC_REFERENCE_TEMP_C)
}

pub fn calc_voc_cold_with_reference(
    voc_stc: f64,
    temp_coeff: f64,
    tmin: f64,
    reference_temp_c: f64,
) -> f64 {
    let delta = reference_temp_c - tmin;
    voc_stc * (1.0 + temp_coeff.abs() * delta)
}

/// 寻找满足限值的最大每串组件数
///
/// 从当前值逐一递减,下限为 1（无解时返回 1）
pub fn suggest_modules_per_string(voc_cold: f64, current: u32, inverter_vmax: f64) -> u32 {
    let mut suggested = current.max(1);
    while suggested > 1 && voc_cold * f64::from(suggested) > inverter_vmax {
        suggested -= 1;
    }
    suggested
}

/// 冬季过电压检查结果
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateCheck {
    pub status: CheckStatus,
    pub numbers: ClimateNumbers,
    pub recommendations: Vec<String>,
}

// ==========================================
// ClimateVoltageEngine
// ==========================================
pub struct ClimateVoltageEngine {
    reference_temp_c: f64,
}

impl ClimateVoltageEngine {
    pub fn new(config: &ReviewConfig) -> Self {
        Self {
            reference_temp_c: config.stc_reference_temp_c,
        }
    }

    /// 执行冬季过电压检查
    ///
    /// # 参数
    /// - `bom`: 已补全默认值的 BoM 信号
    /// - `tmin`: 设计最低温度 (°C)
    #[instrument(skip(self, bom), fields(modules_per_string = bom.modules_per_string))]
    pub fn check(&self, bom: &BomSignal, tmin: f64) -> ClimateCheck {
        let voc_cold =
            calc_voc_cold_with_reference(bom.voc_stc, bom.temp_coeff, tmin, self.reference_temp_c);
        let mps = bom.modules_per_string;
        let vmax = bom.inverter_vmax;
        let string_v = voc_cold * f64::from(mps);

        let numbers = ClimateNumbers {
            voc_stc_per_module_v: bom.voc_stc,
            temp_coeff_per_c: bom.temp_coeff,
            tmin_c: tmin,
            voc_cold_per_module_v: voc_cold,
            modules_per_string: mps,
            string_voc_at_tmin_v: string_v,
            inverter_dc_max_v: vmax,
        };

        if string_v <= vmax {
            tracing::info!(string_v, vmax, tmin, "组串电压在逆变器限值内");
            return ClimateCheck {
                status: CheckStatus::new(
                    CheckLevel::Pass,
                    CLIMATE_TITLE,
                    vec!["Worst-case string Voc at Tmin is within inverter DC max.".to_string()],
                ),
                numbers,
                recommendations: Vec::new(),
            };
        }

        let suggested = suggest_modules_per_string(voc_cold, mps, vmax);
        tracing::warn!(string_v, vmax, tmin, from = mps, to = suggested, "组串电压超过逆变器限值");

        ClimateCheck {
            status: CheckStatus::new(
                CheckLevel::Fail,
                CLIMATE_TITLE,
                vec![
                    "String Voc at Tmin exceeds inverter DC max. Potential inverter damage risk."
                        .to_string(),
                ],
            ),
            numbers,
            recommendations: vec![
                format!(
                    "Reduce modules/string from {} to {} to keep string Voc at Tmin ≤ {:.0} V.",
                    mps, suggested, vmax
                ),
                "Re-check string sizing for all MPPT inputs and confirm manufacturer absolute max DC voltage limits."
                    .to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voc_cold_reference_point() {
        // Tmin = 25°C 时无温升
        assert_eq!(calc_voc_cold(49.5, -0.0029, 25.0), 49.5);
    }

    #[test]
    fn test_voc_cold_sign_of_coefficient_is_irrelevant() {
        assert_eq!(
            calc_voc_cold(49.5, -0.0029, -5.0),
            calc_voc_cold(49.5, 0.0029, -5.0)
        );
        assert!((calc_voc_cold(49.5, -0.0029, -5.0) - 53.8065).abs() < 1e-9);
    }

    #[test]
    fn test_suggest_never_below_one() {
        assert_eq!(suggest_modules_per_string(2000.0, 22, 1100.0), 1);
        assert_eq!(suggest_modules_per_string(53.8065, 22, 1100.0), 20);
        assert_eq!(suggest_modules_per_string(50.0, 22, 1100.0), 22);
    }

    fn bom(voc_stc: f64, temp_coeff: f64, mps: u32, vmax: f64) -> BomSignal {
        use crate::domain::signal::{SourceProvenance, ValueSource};
        BomSignal {
            voc_stc,
            temp_coeff,
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

    #[test]
    fn test_string_voltage_equal_to_limit_passes() {
        let engine = ClimateVoltageEngine::new(&ReviewConfig::default());

        let result = engine.check(&bom(50.0, 0.0, 22, 1100.0), 25.0);

        assert_eq!(result.numbers.string_voc_at_tmin_v, 1100.0);
        assert_eq!(result.status.level, CheckLevel::Pass);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_suggestion_accepts_exact_limit() {
        // 23 × 50 = 1150 超限, 22 × 50 = 1100 恰好等于限值
        assert_eq!(suggest_modules_per_string(50.0, 23, 1100.0), 22);
    }

    #[test]
    fn test_over_limit_fails_with_recommendations() {
        let engine = ClimateVoltageEngine::new(&ReviewConfig::default());

        let result = engine.check(&bom(49.5, -0.0029, 22, 1100.0), -5.0);

        assert_eq!(result.status.level, CheckLevel::Fail);
        assert_eq!(result.status.title, CLIMATE_TITLE);
        assert_eq!(
            result.recommendations[0],
            "Reduce modules/string from 22 to 20 to keep string Voc at Tmin ≤ 1100 V."
        );
    }
}
