// ==========================================
// PV 设计评审引擎 - 评审参数快照
// ==========================================
// 职责: 由 ConfigManager 产出的强类型参数,各引擎按此构建
// ==========================================

use serde::{Deserialize, Serialize};

/// BoM 字段缺失时的默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomDefaults {
    pub voc_stc: f64,
    pub temp_coeff: f64,
    pub modules_per_string: u32,
    pub inverter_vmax: f64,
    pub inverter_name: String,
}

impl Default for BomDefaults {
    fn default() -> Self {
        Self {
            voc_stc: 49.5,
            temp_coeff: -0.0029,
            modules_per_string: 22,
            inverter_vmax: 1100.0,
            inverter_name: "Inverter model not specified".to_string(),
        }
    }
}

/// 评审参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// 报告项目名
    pub project_name: String,

    /// 未选择站点时的站点标签
    pub default_site_label: String,

    /// SLD 最多读取的页数
    pub sld_max_pages: usize,

    /// 电压比较容差 (V)
    pub vmax_epsilon_v: f64,

    /// 温度系数绝对值超过该阈值时按百分数处理（除以 100）
    pub temp_coeff_percent_threshold: f64,

    /// STC 参考温度 (°C)
    pub stc_reference_temp_c: f64,

    /// 汇总前将一致性检查的 INFO 视同 PASS
    pub collapse_info_for_aggregation: bool,

    #[serde(default)]
    pub bom_defaults: BomDefaults,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            project_name: "SANAD".to_string(),
            default_site_label: "-".to_string(),
            sld_max_pages: 3,
            vmax_epsilon_v: 1e-6,
            temp_coeff_percent_threshold: 0.05,
            stc_reference_temp_c: 25.0,
            collapse_info_for_aggregation: true,
            bom_defaults: BomDefaults::default(),
        }
    }
}
