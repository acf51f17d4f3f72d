// ==========================================
// 批次腌制排产系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含排产逻辑，不含文件读写
// ==========================================

pub mod capacity;
pub mod lot;
pub mod report;
pub mod types;

// 重导出核心类型
pub use capacity::{TierCapacity, TierOverride};
pub use lot::Lot;
pub use report::{DailyLoadRow, StabilizationReportRow};
pub use types::{CapacityTier, FallbackPolicy, FitFlag, PlacementOrigin, Stage, UnfitReason};
