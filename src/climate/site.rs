// ==========================================
// PV 设计评审引擎 - 站点标签
// ==========================================

use serde::Deserialize;

/// 地理编码结果（只取生成站点标签与坐标所需字段）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoResult {
    pub name: String,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoResult {
    /// "name, admin1, country"; admin1 缺失时为 "name, country"
    pub fn label(&self) -> String {
        let country = self.country.as_deref().unwrap_or("");
        match self.admin1.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(admin1) => format!("{}, {}, {}", self.name, admin1, country),
            None => format!("{}, {}", self.name, country),
        }
    }
}

/// 地理编码接口响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeoResult>>,
}

impl GeocodingResponse {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn into_results(self) -> Vec<GeoResult> {
        self.results.unwrap_or_default()
    }
}
