// ==========================================
// PV 设计评审引擎 - 配置层
// ==========================================
// 职责: 评审参数管理,缺省即文档化默认值
// 存储: 仅内存（单次会话,无持久化）
// ==========================================

pub mod config_manager;
pub mod review_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager};
pub use review_config::{BomDefaults, ReviewConfig};
