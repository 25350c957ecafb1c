// ==========================================
// PV 设计评审引擎 - 气候数据层
// ==========================================
// 职责: 由气象接口返回的数据推导设计 Tmin、生成站点标签
// 红线: 不含 HTTP 客户端,评审引擎只消费推导出的标量
// ==========================================

pub mod design_tmin;
pub mod site;

pub use design_tmin::{
    design_tmin, design_tmin_from_archive_json, quantile, ArchiveResponse, ArchiveWindow,
    TminEstimate, DEFAULT_ARCHIVE_YEARS,
};
pub use site::{GeoResult, GeocodingResponse};
