// ==========================================
// 批次腌制排产系统 - 配置层
// ==========================================
// 职责: 配置加载、校验、规范化
// 存储: JSON 文档
// ==========================================

pub mod config_loader;
pub mod error;
pub mod plan_settings;
pub mod planner_config;

// 重导出核心配置类型
pub use config_loader::ConfigLoader;
pub use error::{ConfigError, ConfigResult};
pub use plan_settings::{PlanSettings, SyncGroup, OTHER_PRODUCT_TYPE};
pub use planner_config::{
    DateCapacityOverride, DateTierOverride, PlannerConfig, SyncGroupConfig,
};
