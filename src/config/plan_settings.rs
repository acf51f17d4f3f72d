// ==========================================
// 批次腌制排产系统 - 规范化排产配置
// ==========================================
// 来源: PlannerConfig::validate()
// 红线: 单次运行内只读
// ==========================================

use crate::domain::capacity::{TierCapacity, TierOverride};
use crate::domain::types::{FallbackPolicy, Stage};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// 产品类型未命中任何前缀时的标签
pub const OTHER_PRODUCT_TYPE: &str = "OTHER";

/// 规范化后的同步组
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncGroup {
    pub name: String,
    /// 配置顺序，已去重
    pub product_codes: Vec<String>,
    pub fallback: FallbackPolicy,
}

impl SyncGroup {
    pub fn contains(&self, product_code: &str) -> bool {
        self.product_codes.iter().any(|c| c == product_code)
    }
}

// ==========================================
// PlanSettings - 单次运行的只读配置
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSettings {
    pub intake_capacity: TierCapacity,
    pub dispatch_capacity: TierCapacity,
    pub stabilization_capacity: i64,
    pub max_storage_days: i64,
    pub product_max_storage_days: BTreeMap<String, i64>,
    pub intake_overrides: BTreeMap<NaiveDate, TierOverride>,
    pub dispatch_overrides: BTreeMap<NaiveDate, TierOverride>,
    pub stabilization_overrides: BTreeMap<NaiveDate, i64>,
    pub holidays: BTreeSet<NaiveDate>,
    pub weekend_adjustment: bool,
    pub holiday_adjustment: bool,
    pub product_types: BTreeMap<char, String>,
    pub sync_groups: Vec<SyncGroup>,
}

impl PlanSettings {
    /// 产品最大存放天数（产品覆写优先，否则全局）
    pub fn max_storage_days_for(&self, product_code: &str) -> i64 {
        self.product_max_storage_days
            .get(product_code)
            .copied()
            .unwrap_or(self.max_storage_days)
    }

    /// 按产品代码首字符分类
    pub fn product_type_of(&self, product_code: &str) -> &str {
        product_code
            .chars()
            .next()
            .and_then(|c| self.product_types.get(&c))
            .map(String::as_str)
            .unwrap_or(OTHER_PRODUCT_TYPE)
    }

    /// 某阶段的全局两档产能
    pub fn global_capacity(&self, stage: Stage) -> TierCapacity {
        match stage {
            Stage::Intake => self.intake_capacity,
            Stage::Dispatch => self.dispatch_capacity,
        }
    }

    /// 某阶段的按日期覆写表
    pub fn overrides(&self, stage: Stage) -> &BTreeMap<NaiveDate, TierOverride> {
        match stage {
            Stage::Intake => &self.intake_overrides,
            Stage::Dispatch => &self.dispatch_overrides,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::PlannerConfig;

    #[test]
    fn test_product_lookups() {
        let mut config = PlannerConfig::default();
        config.product_max_storage_days.insert("J10".to_string(), 2);
        let settings = config.validate().unwrap();

        assert_eq!(settings.max_storage_days_for("J10"), 2);
        assert_eq!(settings.max_storage_days_for("P01"), 5);
        assert_eq!(settings.product_type_of("J10"), "JAMON");
        assert_eq!(settings.product_type_of("P01"), "PALETA");
        assert_eq!(settings.product_type_of("X9"), "OTHER");
        assert_eq!(settings.product_type_of(""), "OTHER");
    }
}
