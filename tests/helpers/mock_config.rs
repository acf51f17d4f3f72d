// ==========================================
// 测试配置 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use lot_intake_aps::config::{
    DateCapacityOverride, DateTierOverride, PlanSettings, PlannerConfig, SyncGroupConfig,
};
use lot_intake_aps::domain::FallbackPolicy;

/// 测试配置构建器（默认无节假日，其余取生产默认值）
pub struct ConfigBuilder {
    config: PlannerConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        let mut config = PlannerConfig::default();
        config.holidays.clear();
        Self { config }
    }

    pub fn intake(mut self, tier1: i64, tier2: i64) -> Self {
        self.config.intake_capacity.tier1 = tier1;
        self.config.intake_capacity.tier2 = tier2;
        self
    }

    pub fn dispatch(mut self, tier1: i64, tier2: i64) -> Self {
        self.config.dispatch_capacity.tier1 = tier1;
        self.config.dispatch_capacity.tier2 = tier2;
        self
    }

    pub fn stabilization(mut self, capacity: i64) -> Self {
        self.config.stabilization_capacity = capacity;
        self
    }

    pub fn max_storage_days(mut self, days: i64) -> Self {
        self.config.max_storage_days = days;
        self
    }

    pub fn product_storage_days(mut self, product: &str, days: i64) -> Self {
        self.config
            .product_max_storage_days
            .insert(product.to_string(), days);
        self
    }

    pub fn holiday(mut self, date: NaiveDate) -> Self {
        self.config.holidays.push(date);
        self
    }

    pub fn weekend_adjustment(mut self, enabled: bool) -> Self {
        self.config.weekend_adjustment = enabled;
        self
    }

    pub fn intake_override(mut self, date: NaiveDate, tier1: Option<i64>, tier2: Option<i64>) -> Self {
        self.config
            .intake_overrides
            .push(DateTierOverride { date, tier1, tier2 });
        self
    }

    pub fn dispatch_override(mut self, date: NaiveDate, tier1: Option<i64>, tier2: Option<i64>) -> Self {
        self.config
            .dispatch_overrides
            .push(DateTierOverride { date, tier1, tier2 });
        self
    }

    pub fn stabilization_override(mut self, date: NaiveDate, capacity: i64) -> Self {
        self.config
            .stabilization_overrides
            .push(DateCapacityOverride { date, capacity });
        self
    }

    pub fn group(mut self, name: &str, codes: &[&str], fallback: FallbackPolicy) -> Self {
        self.config.sync_groups.push(SyncGroupConfig {
            name: Some(name.to_string()),
            product_codes: codes.iter().map(|c| c.to_string()).collect(),
            fallback,
        });
        self
    }

    pub fn config(self) -> PlannerConfig {
        self.config
    }

    pub fn build(self) -> PlanSettings {
        self.config.validate().unwrap()
    }
}
