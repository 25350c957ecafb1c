// ==========================================
// PV 设计评审引擎 - 检查结果领域模型
// ==========================================
// 职责: 每项检查的输出值对象 + 气候电压数值包
// ==========================================

use crate::domain::types::CheckLevel;
use serde::{Deserialize, Serialize};

// ==========================================
// CheckStatus - 检查结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckStatus {
    pub level: CheckLevel,    // 检查等级
    pub title: String,        // 检查名称
    pub details: Vec<String>, // 有序的发现条目
}

impl CheckStatus {
    pub fn new(level: CheckLevel, title: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            level,
            title: title.into(),
            details,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.level == CheckLevel::Pass
    }
}

// ==========================================
// ClimateNumbers - 气候电压数值包
// ==========================================
// 红线: 序列化键名属于对外契约（报告 / KPI 直接按键读取）,不得改名
// 字段顺序即报告 "Key Numbers" 的输出顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateNumbers {
    #[serde(rename = "Voc_STC_per_module_V")]
    pub voc_stc_per_module_v: f64, // 组件 STC 开路电压

    #[serde(rename = "TempCoeff_per_C")]
    pub temp_coeff_per_c: f64, // 温度系数（已归一化）

    #[serde(rename = "Tmin_C")]
    pub tmin_c: f64, // 设计最低温度

    #[serde(rename = "Voc_cold_per_module_V")]
    pub voc_cold_per_module_v: f64, // Tmin 下组件开路电压

    #[serde(rename = "Modules_per_string")]
    pub modules_per_string: u32, // 每串组件数

    #[serde(rename = "String_Voc_at_Tmin_V")]
    pub string_voc_at_tmin_v: f64, // Tmin 下组串开路电压

    #[serde(rename = "Inverter_DC_max_V")]
    pub inverter_dc_max_v: f64, // 逆变器直流最大输入电压
}

/// 数值包中的单个数值（整数 / 浮点）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Float(f64),
    Int(u32),
}

impl std::fmt::Display for NumberValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberValue::Float(v) => write!(f, "{}", v),
            NumberValue::Int(v) => write!(f, "{}", v),
        }
    }
}

impl ClimateNumbers {
    /// 按契约键名与顺序展开
    pub fn entries(&self) -> Vec<(&'static str, NumberValue)> {
        vec![
            ("Voc_STC_per_module_V", NumberValue::Float(self.voc_stc_per_module_v)),
            ("TempCoeff_per_C", NumberValue::Float(self.temp_coeff_per_c)),
            ("Tmin_C", NumberValue::Float(self.tmin_c)),
            ("Voc_cold_per_module_V", NumberValue::Float(self.voc_cold_per_module_v)),
            ("Modules_per_string", NumberValue::Int(self.modules_per_string)),
            ("String_Voc_at_Tmin_V", NumberValue::Float(self.string_voc_at_tmin_v)),
            ("Inverter_DC_max_V", NumberValue::Float(self.inverter_dc_max_v)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClimateNumbers {
        ClimateNumbers {
            voc_stc_per_module_v: 49.5,
            temp_coeff_per_c: -0.0029,
            tmin_c: -5.0,
            voc_cold_per_module_v: 53.8065,
            modules_per_string: 22,
            string_voc_at_tmin_v: 1183.743,
            inverter_dc_max_v: 1100.0,
        }
    }

    #[test]
    fn test_numbers_serialize_with_contract_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 7);
        for (key, _) in sample().entries() {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert_eq!(obj["Modules_per_string"], serde_json::json!(22));
    }

    #[test]
    fn test_entries_keep_report_order() {
        let keys: Vec<&str> = sample().entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"Voc_STC_per_module_V"));
        assert_eq!(keys.last(), Some(&"Inverter_DC_max_V"));
    }
}
