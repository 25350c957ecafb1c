// ==========================================
// PV 设计评审引擎 - 电气信号领域模型
// ==========================================
// 职责: BoM 规范信号（全量,带默认值）与 SLD 信号（部分,可缺失）
// 红线: 信号一经计算不可变,每次评审重新计算
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// BomField - BoM 目标字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BomField {
    VocStc,
    TempCoeff,
    ModulesPerString,
    InverterVmax,
    InverterName,
}

impl BomField {
    pub const ALL: [BomField; 5] = [
        BomField::VocStc,
        BomField::TempCoeff,
        BomField::ModulesPerString,
        BomField::InverterVmax,
        BomField::InverterName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BomField::VocStc => "voc_stc",
            BomField::TempCoeff => "temp_coeff",
            BomField::ModulesPerString => "modules_per_string",
            BomField::InverterVmax => "inverter_vmax",
            BomField::InverterName => "inverter_name",
        }
    }
}

impl fmt::Display for BomField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// ValueSource - 字段来源
// ==========================================
// 序列化为列名或字面量 "DEFAULT"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    Column(String),
    Default,
}

impl ValueSource {
    pub const DEFAULT_LABEL: &'static str = "DEFAULT";

    pub fn is_default(&self) -> bool {
        matches!(self, ValueSource::Default)
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Column(name) => f.write_str(name),
            ValueSource::Default => f.write_str(Self::DEFAULT_LABEL),
        }
    }
}

impl Serialize for ValueSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ValueSource {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == Self::DEFAULT_LABEL {
            Ok(ValueSource::Default)
        } else {
            Ok(ValueSource::Column(raw))
        }
    }
}

// ==========================================
// SourceProvenance - 五个字段的来源映射
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProvenance {
    pub voc_stc: ValueSource,
    pub temp_coeff: ValueSource,
    pub modules_per_string: ValueSource,
    pub inverter_vmax: ValueSource,
    pub inverter_name: ValueSource,
}

impl SourceProvenance {
    pub fn get(&self, field: BomField) -> &ValueSource {
        match field {
            BomField::VocStc => &self.voc_stc,
            BomField::TempCoeff => &self.temp_coeff,
            BomField::ModulesPerString => &self.modules_per_string,
            BomField::InverterVmax => &self.inverter_vmax,
            BomField::InverterName => &self.inverter_name,
        }
    }

    /// 所有字段均为默认值
    pub fn all_default(&self) -> bool {
        BomField::ALL.iter().all(|f| self.get(*f).is_default())
    }
}

// ==========================================
// BomSignal - BoM 规范信号
// ==========================================
// 不变量: 所有字段始终有值（默认值保证完备性）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomSignal {
    pub voc_stc: f64,            // 组件 STC 开路电压 (V)
    pub temp_coeff: f64,         // 开路电压温度系数 (1/°C, 小数形式)
    pub modules_per_string: u32, // 每串组件数
    pub inverter_vmax: f64,      // 逆变器直流最大输入电压 (V)
    pub inverter_name: String,   // 逆变器型号（自由文本）
    pub source_provenance: SourceProvenance,
}

// ==========================================
// SldOutcome - SLD 文本提取结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SldOutcome {
    Extracted,           // 文本可读,已执行匹配
    EmptyText,           // 文本为空（大概率为扫描件）
    Unavailable(String), // 提取能力不可用（失败类别）
}

impl SldOutcome {
    /// 结果说明文字
    pub fn note(&self) -> String {
        match self {
            SldOutcome::Extracted => "SLD signals extracted from text (best-effort).".to_string(),
            SldOutcome::EmptyText => "SLD text extraction empty (scan/image likely).".to_string(),
            SldOutcome::Unavailable(category) => {
                format!("SLD extraction unavailable ({}).", category)
            }
        }
    }
}

// ==========================================
// SldSignal - SLD 信号（部分）
// ==========================================
// 不变量: 未检出即为 None,缺失不是错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SldSignal {
    pub inverter_vmax: Option<f64>,
    pub modules_per_string: Option<u32>,
    pub outcome: SldOutcome,
    pub notes: String,
}

impl SldSignal {
    /// 两个信号均缺失的结果
    pub fn absent(outcome: SldOutcome) -> Self {
        let notes = outcome.note();
        Self {
            inverter_vmax: None,
            modules_per_string: None,
            outcome,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_source_serializes_as_plain_string() {
        let json = serde_json::to_string(&ValueSource::Default).unwrap();
        assert_eq!(json, "\"DEFAULT\"");

        let col: ValueSource = serde_json::from_str("\"Module_Voc\"").unwrap();
        assert_eq!(col, ValueSource::Column("Module_Voc".to_string()));
    }

    #[test]
    fn test_absent_signal_note() {
        let sig = SldSignal::absent(SldOutcome::Unavailable("InvalidDocument".to_string()));
        assert!(sig.inverter_vmax.is_none());
        assert!(sig.modules_per_string.is_none());
        assert_eq!(sig.notes, "SLD extraction unavailable (InvalidDocument).");
    }
}
