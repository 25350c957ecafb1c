// ==========================================
// PV 设计评审引擎 - API 层
// ==========================================
// 职责: 对外评审接口,输入校验,错误汇总
// ==========================================

pub mod error;
pub mod review_api;

pub use error::{ApiError, ApiResult};
pub use review_api::ReviewApi;
