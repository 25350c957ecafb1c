// ==========================================
// PV 设计评审引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、默认值回退
// 存储: 内存 key-value（来自 JSON 对象,无持久化）
// ==========================================

use crate::config::review_config::{BomDefaults, ReviewConfig};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const PROJECT_NAME: &str = "project_name";
    pub const DEFAULT_SITE_LABEL: &str = "default_site_label";
    pub const SLD_MAX_PAGES: &str = "sld_max_pages";
    pub const VMAX_EPSILON_V: &str = "vmax_epsilon_v";
    pub const TEMP_COEFF_PERCENT_THRESHOLD: &str = "temp_coeff_percent_threshold";
    pub const STC_REFERENCE_TEMP_C: &str = "stc_reference_temp_c";
    pub const COLLAPSE_INFO_FOR_AGGREGATION: &str = "collapse_info_for_aggregation";
    pub const DEFAULT_VOC_STC: &str = "default_voc_stc";
    pub const DEFAULT_TEMP_COEFF: &str = "default_temp_coeff";
    pub const DEFAULT_MODULES_PER_STRING: &str = "default_modules_per_string";
    pub const DEFAULT_INVERTER_VMAX: &str = "default_inverter_vmax";
    pub const DEFAULT_INVERTER_NAME: &str = "default_inverter_name";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置解析失败: {0}")]
    ParseError(String),

    #[error("配置值无效 (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象字符串加载
    ///
    /// 值可为字符串、数字或布尔,统一按字符串存储
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let obj = value
            .as_object()
            .ok_or_else(|| ConfigError::ParseError("配置必须为 JSON 对象".to_string()))?;

        let mut values = HashMap::new();
        for (key, v) in obj {
            let text = match v {
                Value::String(s) => s.clone(),
                Value::Null => continue,
                other => other.to_string(),
            };
            values.insert(key.clone(), text);
        }

        Ok(Self { values })
    }

    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// 覆写单个配置项
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// 读取配置值,带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| default.to_string())
    }

    /// 读取并解析配置值,格式错误时回退默认值
    fn get_parsed<T: FromStr + Copy + std::fmt::Display>(&self, key: &str, default: T) -> T {
        match self.get_config_value(key) {
            None => default,
            Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    "配置值格式错误，使用默认值"
                );
                default
            }),
        }
    }

    /// 生成强类型评审参数
    ///
    /// # 返回
    /// - Ok(ReviewConfig): 参数快照
    /// - Err(ValueError): 值可解析但不在合法范围内
    pub fn review_config(&self) -> Result<ReviewConfig, ConfigError> {
        let base = ReviewConfig::default();
        let base_defaults = BomDefaults::default();

        let config = ReviewConfig {
            project_name: self.get_config_or_default(config_keys::PROJECT_NAME, &base.project_name),
            default_site_label: self
                .get_config_or_default(config_keys::DEFAULT_SITE_LABEL, &base.default_site_label),
            sld_max_pages: self.get_parsed(config_keys::SLD_MAX_PAGES, base.sld_max_pages),
            vmax_epsilon_v: self.get_parsed(config_keys::VMAX_EPSILON_V, base.vmax_epsilon_v),
            temp_coeff_percent_threshold: self.get_parsed(
                config_keys::TEMP_COEFF_PERCENT_THRESHOLD,
                base.temp_coeff_percent_threshold,
            ),
            stc_reference_temp_c: self
                .get_parsed(config_keys::STC_REFERENCE_TEMP_C, base.stc_reference_temp_c),
            collapse_info_for_aggregation: self.get_parsed(
                config_keys::COLLAPSE_INFO_FOR_AGGREGATION,
                base.collapse_info_for_aggregation,
            ),
            bom_defaults: BomDefaults {
                voc_stc: self.get_parsed(config_keys::DEFAULT_VOC_STC, base_defaults.voc_stc),
                temp_coeff: self
                    .get_parsed(config_keys::DEFAULT_TEMP_COEFF, base_defaults.temp_coeff),
                modules_per_string: self.get_parsed(
                    config_keys::DEFAULT_MODULES_PER_STRING,
                    base_defaults.modules_per_string,
                ),
                inverter_vmax: self
                    .get_parsed(config_keys::DEFAULT_INVERTER_VMAX, base_defaults.inverter_vmax),
                inverter_name: self.get_config_or_default(
                    config_keys::DEFAULT_INVERTER_NAME,
                    &base_defaults.inverter_name,
                ),
            },
        };

        validate(&config)?;
        Ok(config)
    }
}

fn value_error(key: &str, value: impl ToString, message: &str) -> ConfigError {
    ConfigError::ValueError {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

fn validate(config: &ReviewConfig) -> Result<(), ConfigError> {
    if config.sld_max_pages == 0 {
        return Err(value_error(config_keys::SLD_MAX_PAGES, 0, "至少读取 1 页"));
    }
    if !(config.vmax_epsilon_v >= 0.0) {
        return Err(value_error(
            config_keys::VMAX_EPSILON_V,
            config.vmax_epsilon_v,
            "容差不能为负",
        ));
    }
    if !(config.temp_coeff_percent_threshold > 0.0) {
        return Err(value_error(
            config_keys::TEMP_COEFF_PERCENT_THRESHOLD,
            config.temp_coeff_percent_threshold,
            "阈值必须为正",
        ));
    }
    if config.bom_defaults.modules_per_string == 0 {
        return Err(value_error(
            config_keys::DEFAULT_MODULES_PER_STRING,
            0,
            "组串组件数必须为正整数",
        ));
    }
    Ok(())
}
