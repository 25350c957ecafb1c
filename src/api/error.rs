// ==========================================
// PV 设计评审引擎 - API层错误类型
// ==========================================
// 职责: 汇总导入 / 配置 / 输入错误,转换为调用方可展示的错误消息
// 红线: 任何错误都整体中止本次评审,不返回部分载荷
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("SLD 文件读取失败 ({path}): {message}")]
    DocumentReadError { path: String, message: String },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// API Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
