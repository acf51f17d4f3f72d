// ==========================================
// 批次腌制排产系统 - 产能领域模型
// ==========================================
// 入盐/出盐: 两档日产能 (第1次尝试 / 第2次尝试) + 按日期覆写
// 稳定库: 单档日容量 + 按日期覆写
// ==========================================

use crate::domain::types::CapacityTier;
use serde::{Deserialize, Serialize};

// ==========================================
// TierCapacity - 全局两档产能
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCapacity {
    pub tier1: i64, // 第1次尝试上限
    pub tier2: i64, // 第2次尝试上限
}

impl TierCapacity {
    pub fn new(tier1: i64, tier2: i64) -> Self {
        Self { tier1, tier2 }
    }

    pub fn for_tier(&self, tier: CapacityTier) -> i64 {
        match tier {
            CapacityTier::First => self.tier1,
            CapacityTier::Second => self.tier2,
        }
    }
}

// ==========================================
// TierOverride - 单日产能覆写
// ==========================================
// 缺省档位 = 使用全局对应档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierOverride {
    pub tier1: Option<i64>,
    pub tier2: Option<i64>,
}

impl TierOverride {
    pub fn for_tier(&self, tier: CapacityTier) -> Option<i64> {
        match tier {
            CapacityTier::First => self.tier1,
            CapacityTier::Second => self.tier2,
        }
    }

    /// 覆写值优先，否则回落到全局档位
    pub fn resolve(&self, global: &TierCapacity, tier: CapacityTier) -> i64 {
        self.for_tier(tier).unwrap_or_else(|| global.for_tier(tier))
    }
}
