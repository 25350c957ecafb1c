// ==========================================
// PV 设计评审引擎 - 核心库
// ==========================================
// 职责: 光伏设计提交物评审（BoM / SLD / 气候电压）→ 合规报告载荷
// 系统定位: 决策支持（评审结论由人工最终确认）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值对象与数据契约
pub mod domain;

// 导入层 - BoM 文件
pub mod importer;

// 引擎层 - 评审规则
pub mod engine;

// 气候数据层 - 设计 Tmin
pub mod climate;

// 报告层 - 文本排版
pub mod report;

// 配置层 - 评审参数
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 评审接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BomField, BomSignal, BomTable, CellValue, CheckLevel, CheckStatus, ClimateNumbers,
    ReviewPayload, SectionStatus, SldOutcome, SldSignal, SourceProvenance, ValueSource,
};

// 引擎
pub use engine::{
    BomSignalExtractor, ClimateVoltageEngine, ConsistencyChecker, ReviewOrchestrator,
    ReviewOutcome, ReviewPayloadAssembler, SldSignalExtractor, StandardsSnapshot,
};

// API
pub use api::{ApiError, ReviewApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "SANAD PV Design Review";
