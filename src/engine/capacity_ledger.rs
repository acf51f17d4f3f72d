// ==========================================
// 批次腌制排产系统 - 产能台账
// ==========================================
// 职责: 单阶段（入盐或出盐）按日期累计已承诺数量
// 红线: 只通过 commit 修改；已有日期的批次在运行开始时一次性计入
// ==========================================

use crate::domain::capacity::{TierCapacity, TierOverride};
use crate::domain::types::{CapacityTier, Stage};
use chrono::NaiveDate;
use std::collections::BTreeMap;

// ==========================================
// CapacityLedger - 单阶段日产能台账
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityLedger {
    stage: Stage,
    global: TierCapacity,
    overrides: BTreeMap<NaiveDate, TierOverride>,
    committed: BTreeMap<NaiveDate, i64>,
}

impl CapacityLedger {
    pub fn new(
        stage: Stage,
        global: TierCapacity,
        overrides: BTreeMap<NaiveDate, TierOverride>,
    ) -> Self {
        Self {
            stage,
            global,
            overrides,
            committed: BTreeMap::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// 当日已承诺数量
    pub fn committed(&self, date: NaiveDate) -> i64 {
        self.committed.get(&date).copied().unwrap_or(0)
    }

    /// 当日有效产能：覆写档位优先，否则全局档位
    pub fn effective_capacity(&self, date: NaiveDate, tier: CapacityTier) -> i64 {
        match self.overrides.get(&date) {
            Some(ov) => ov.resolve(&self.global, tier),
            None => self.global.for_tier(tier),
        }
    }

    /// 追加 quantity 后是否仍不超过该档有效产能；合计溢出视为超出
    pub fn would_fit(&self, date: NaiveDate, quantity: i64, tier: CapacityTier) -> bool {
        self.committed(date)
            .checked_add(quantity)
            .is_some_and(|total| total <= self.effective_capacity(date, tier))
    }

    /// 承诺数量（无容量检查，饱和累加）
    pub fn commit(&mut self, date: NaiveDate, quantity: i64) {
        let entry = self.committed.entry(date).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// 所有有负荷的日期（升序）
    pub fn iter_committed(&self) -> impl Iterator<Item = (NaiveDate, i64)> + '_ {
        self.committed.iter().map(|(d, q)| (*d, *q))
    }

    pub fn total_committed(&self) -> i64 {
        self.committed.values().fold(0, |acc, q| acc.saturating_add(*q))
    }
}
