// ==========================================
// PV 设计评审引擎 - 设计最低温度推导
// ==========================================
// 口径: 多年日最低温序列的第 1 百分位（相邻次序统计量线性插值）,向下取整
// 说明: 只处理气象归档接口返回的数据,不发起 HTTP 请求
// ==========================================

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

/// 设计最低温度使用的分位数
pub const DESIGN_TMIN_QUANTILE: f64 = 0.01;

/// 默认统计年数
pub const DEFAULT_ARCHIVE_YEARS: u32 = 10;

/// 设计最低温度推导结果
#[derive(Debug, Clone, PartialEq)]
pub struct TminEstimate {
    pub tmin_c: Option<f64>,
    pub method: String,
}

/// 线性插值分位数（输入无需有序）
///
/// 空序列返回 None
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// 由日最低温序列推导设计 Tmin
///
/// 缺测值（None / NaN）先剔除
pub fn design_tmin(daily_min: &[Option<f64>], years: u32) -> TminEstimate {
    let values: Vec<f64> = daily_min
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();

    match quantile(&values, DESIGN_TMIN_QUANTILE) {
        None => TminEstimate {
            tmin_c: None,
            method: "Archive: no Tmin data".to_string(),
        },
        Some(p01) => TminEstimate {
            tmin_c: Some(p01.floor()),
            method: format!("Archive: {}y Tmin (1st percentile, floored)", years),
        },
    }
}

// ==========================================
// 气象归档接口数据
// ==========================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
}

/// 归档接口响应（只取日最低温）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveResponse {
    #[serde(default)]
    pub daily: Option<DailySeries>,
}

impl ArchiveResponse {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn design_tmin(&self, years: u32) -> TminEstimate {
        let series = self
            .daily
            .as_ref()
            .map(|d| d.temperature_2m_min.as_slice())
            .unwrap_or(&[]);
        design_tmin(series, years)
    }
}

/// 从归档响应 JSON 推导设计 Tmin（默认回溯年数）
pub fn design_tmin_from_archive_json(raw: &str) -> Result<TminEstimate, serde_json::Error> {
    Ok(ArchiveResponse::from_json(raw)?.design_tmin(DEFAULT_ARCHIVE_YEARS))
}

/// 归档查询时间窗
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ArchiveWindow {
    /// 以 end_date 为终点,回溯 365 × years 天
    pub fn ending_at(end_date: NaiveDate, years: u32) -> Self {
        let start_date = end_date - Duration::days(365 * i64::from(years));
        Self {
            start_date,
            end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        assert_eq!(quantile(&values, 0.01), Some(1.0));

        let values = [10.0, 0.0];
        assert_eq!(quantile(&values, 0.5), Some(5.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_design_tmin_is_floored() {
        // 101 个样本: 第 1 百分位恰为第 2 小的值
        let mut series: Vec<Option<f64>> = (0..99).map(|i| Some(10.0 + f64::from(i))).collect();
        series.push(Some(-3.4));
        series.push(Some(-7.0));
        series.push(None);

        let est = design_tmin(&series, 10);
        assert_eq!(est.tmin_c, Some(-4.0));
        assert_eq!(est.method, "Archive: 10y Tmin (1st percentile, floored)");
    }

    #[test]
    fn test_no_data() {
        let est = design_tmin(&[None, None], 10);
        assert_eq!(est.tmin_c, None);
        assert_eq!(est.method, "Archive: no Tmin data");
    }

    #[test]
    fn test_archive_response_parsing() {
        let raw = r#"{"latitude": 28.0, "daily": {"time": ["2020-01-01"], "temperature_2m_min": [1.5, null, -2.2]}}"#;
        let resp = ArchiveResponse::from_json(raw).unwrap();
        assert_eq!(resp.design_tmin(10).tmin_c, Some(-3.0));

        let empty = ArchiveResponse::from_json("{}").unwrap();
        assert_eq!(empty.design_tmin(10).tmin_c, None);
    }

    #[test]
    fn test_archive_json_uses_default_years() {
        let raw = r#"{"daily": {"temperature_2m_min": [4.0, -1.2]}}"#;
        let est = design_tmin_from_archive_json(raw).unwrap();
        assert_eq!(est.tmin_c, Some(-2.0));
        assert_eq!(est.method, "Archive: 10y Tmin (1st percentile, floored)");

        assert!(design_tmin_from_archive_json("not json").is_err());
    }

    #[test]
    fn test_archive_window() {
        let end = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let window = ArchiveWindow::ending_at(end, 1);
        assert_eq!(window.start_date, NaiveDate::from_ymd_opt(2025, 10, 14).unwrap());
    }
}
