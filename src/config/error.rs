// ==========================================
// 批次腌制排产系统 - 配置错误类型
// ==========================================
// 唯一的致命错误来源：必须在任何记账之前抛出
// 工具: thiserror 派生宏
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 文件相关错误 =====
    #[error("配置文件读取失败: {0}")]
    FileReadError(String),

    #[error("配置解析失败: {0}")]
    ParseError(String),

    // ===== 数值范围错误 =====
    #[error("产能不可为负 (key: {key}): {value}")]
    NegativeCapacity { key: String, value: i64 },

    #[error("最大存放天数不可为负 (product: {product}): {value}")]
    NegativeStorageDays { product: String, value: i64 },

    #[error("最大存放天数超出上限 {limit} (product: {product}): {value}")]
    StorageDaysOutOfRange {
        product: String,
        value: i64,
        limit: i64,
    },

    // ===== 覆写错误 =====
    #[error("覆写日期重复 ({table}): {date}")]
    DuplicateOverrideDate { table: String, date: NaiveDate },

    #[error("覆写未设置任何档位 ({table}): {date}")]
    EmptyOverride { table: String, date: NaiveDate },

    #[error("产能覆写不可为负 ({table}, {date}): {value}")]
    NegativeOverride {
        table: String,
        date: NaiveDate,
        value: i64,
    },

    // ===== 同步组错误 =====
    #[error("同步组未包含产品代码: {0}")]
    EmptySyncGroup(String),

    #[error("同步组包含空产品代码: {0}")]
    BlankProductCode(String),

    // ===== 产品类型分类 =====
    #[error("产品类型前缀必须为单个字符: {0:?}")]
    InvalidTypePrefix(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::FileReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
