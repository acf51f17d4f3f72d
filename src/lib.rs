// ==========================================
// 批次腌制排产系统 - 核心库
// ==========================================
// 职责: 入盐/出盐日期排产（日历 + 两档产能 + 稳定库 + 同步组）
// 系统定位: 确定性、顺序敏感的贪心排产，非全局最优
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 排产配置
pub mod config;

// 引擎层 - 排产规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 结果输出
pub mod export;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CapacityTier, FallbackPolicy, FitFlag, PlacementOrigin, Stage, UnfitReason};

// 领域实体
pub use domain::{DailyLoadRow, Lot, StabilizationReportRow, TierCapacity, TierOverride};

// 配置
pub use config::{ConfigError, ConfigLoader, PlanSettings, PlannerConfig};

// 引擎
pub use engine::{
    BusinessCalendar, CapacityLedger, GroupSyncResolver, LotScheduler, PlanOrchestrator,
    PlanResult, PlanSummary, SchedulingContext, StabilizationTracker,
};

// 导入/导出
pub use export::ExportError;
pub use importer::{ImportError, LotImporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "批次腌制排产系统";
