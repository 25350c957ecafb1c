// ==========================================
// PV 设计评审引擎 - 领域类型定义
// ==========================================
// 职责: 检查等级（封闭枚举）与界面徽标映射
// 红线: 等级不使用自由字符串,防止比较时拼写错误静默失效
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 检查等级 (Check Level)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与报告载荷一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckLevel {
    Pass, // 通过
    Warn, // 警告（BoM/SLD 不一致）
    Fail, // 失败（设计缺陷）
    Info, // 信息（信号未检出,不视为缺陷）
}

impl fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckLevel::Pass => write!(f, "PASS"),
            CheckLevel::Warn => write!(f, "WARN"),
            CheckLevel::Fail => write!(f, "FAIL"),
            CheckLevel::Info => write!(f, "INFO"),
        }
    }
}

impl CheckLevel {
    /// 界面徽标文字
    ///
    /// INFO 没有徽标
    pub fn badge_text(&self) -> Option<&'static str> {
        match self {
            CheckLevel::Pass => Some("MATCH"),
            CheckLevel::Warn => Some("WARNING"),
            CheckLevel::Fail => Some("CRITICAL"),
            CheckLevel::Info => None,
        }
    }

    /// 展示严重度排序: FAIL > WARN > INFO > PASS
    pub fn display_severity(&self) -> u8 {
        match self {
            CheckLevel::Pass => 0,
            CheckLevel::Info => 1,
            CheckLevel::Warn => 2,
            CheckLevel::Fail => 3,
        }
    }

    /// 汇总口径: INFO 视同 PASS（信号未检出不是设计缺陷）
    pub fn for_aggregation(&self) -> CheckLevel {
        match self {
            CheckLevel::Info => CheckLevel::Pass,
            other => *other,
        }
    }
}
