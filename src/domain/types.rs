// ==========================================
// 批次腌制排产系统 - 领域类型定义
// ==========================================
// 红线: 不可排入是一等结果 (Unfit)，不是错误
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工序阶段 (Stage)
// ==========================================
// 入盐与出盐各自独立记账
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Intake,   // 入盐
    Dispatch, // 出盐
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Intake => write!(f, "INTAKE"),
            Stage::Dispatch => write!(f, "DISPATCH"),
        }
    }
}

// ==========================================
// 产能档位 (Capacity Tier / Attempt)
// ==========================================
// 顺序: First < Second，第二档更宽松
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapacityTier {
    First,  // 第1次尝试
    Second, // 第2次尝试
}

impl CapacityTier {
    /// 按尝试顺序排列的全部档位
    pub const ATTEMPTS: [CapacityTier; 2] = [CapacityTier::First, CapacityTier::Second];

    /// 尝试序号（1 或 2）
    pub fn attempt_no(self) -> u8 {
        match self {
            CapacityTier::First => 1,
            CapacityTier::Second => 2,
        }
    }
}

impl fmt::Display for CapacityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.attempt_no())
    }
}

// ==========================================
// 可排标记 (Fit Flag)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FitFlag {
    Fits,  // 已排入
    Unfit, // 无法排入
}

impl fmt::Display for FitFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitFlag::Fits => write!(f, "FITS"),
            FitFlag::Unfit => write!(f, "UNFIT"),
        }
    }
}

// ==========================================
// 不可排原因 (Unfit Reason)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnfitReason {
    /// 输入数据不完整/非法，不参与任何记账
    InvalidInput { message: String },
    /// 两档产能在存放窗口内均无可行日期
    NoCapacity,
    /// 同步组联合排产失败且策略为 mark-unfit-on-failure
    GroupInfeasible { group: String },
}

impl fmt::Display for UnfitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnfitReason::InvalidInput { message } => write!(f, "INVALID_INPUT: {}", message),
            UnfitReason::NoCapacity => write!(f, "NO_CAPACITY"),
            UnfitReason::GroupInfeasible { group } => write!(f, "GROUP_INFEASIBLE: {}", group),
        }
    }
}

// ==========================================
// 排入来源 (Placement Origin)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacementOrigin {
    /// 输入时已有入盐日期（权威，不再决策）
    Preassigned,
    /// 同步组统一入盐日期
    GroupSync { group: String, tier: CapacityTier },
    /// 逐批次贪心排产
    Individual { tier: CapacityTier },
}

impl PlacementOrigin {
    /// 排入时使用的产能档位（已有日期的批次无档位）
    pub fn tier(&self) -> Option<CapacityTier> {
        match self {
            PlacementOrigin::Preassigned => None,
            PlacementOrigin::GroupSync { tier, .. } | PlacementOrigin::Individual { tier } => {
                Some(*tier)
            }
        }
    }
}

impl fmt::Display for PlacementOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementOrigin::Preassigned => write!(f, "PREASSIGNED"),
            PlacementOrigin::GroupSync { group, tier } => write!(f, "GROUP_SYNC({}, {})", group, tier),
            PlacementOrigin::Individual { tier } => write!(f, "INDIVIDUAL({})", tier),
        }
    }
}

// ==========================================
// 同步组失败策略 (Fallback Policy)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    MarkUnfitOnFailure,  // 全组标记不可排
    RetryIndependently,  // 按产品代码拆分重试
    Skip,                // 交给逐批次排产
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::Skip
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackPolicy::MarkUnfitOnFailure => write!(f, "mark-unfit-on-failure"),
            FallbackPolicy::RetryIndependently => write!(f, "retry-independently"),
            FallbackPolicy::Skip => write!(f, "skip"),
        }
    }
}
