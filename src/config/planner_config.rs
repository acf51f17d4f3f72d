// ==========================================
// 批次腌制排产系统 - 排产配置（原始文档形式）
// ==========================================
// 存储: JSON 文档；缺省字段取生产默认值
// 职责: 反序列化 + 校验 → PlanSettings
// 红线: 校验失败时不得产生任何记账
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::plan_settings::{PlanSettings, SyncGroup};
use crate::domain::capacity::{TierCapacity, TierOverride};
use crate::domain::types::FallbackPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const CAPACITY_TIER1: i64 = 3100;
    pub const CAPACITY_TIER2: i64 = 3500;
    pub const MAX_STORAGE_DAYS: i64 = 5;
    /// 最大存放天数的上限（约十年）
    pub const STORAGE_DAYS_LIMIT: i64 = 3650;
    pub const STABILIZATION_CAPACITY: i64 = 4700;
    pub const HOLIDAYS: [&str; 7] = [
        "2025-01-01",
        "2025-04-18",
        "2025-05-01",
        "2025-08-15",
        "2025-10-12",
        "2025-11-01",
        "2025-12-25",
    ];
}

/// 按日期的两档产能覆写（入盐/出盐）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTierOverride {
    pub date: NaiveDate,
    #[serde(default)]
    pub tier1: Option<i64>,
    #[serde(default)]
    pub tier2: Option<i64>,
}

/// 按日期的稳定库容量覆写
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCapacityOverride {
    pub date: NaiveDate,
    pub capacity: i64,
}

/// 同步组定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncGroupConfig {
    /// 组名（缺省为 GROUP-<序号>）
    #[serde(default)]
    pub name: Option<String>,
    pub product_codes: Vec<String>,
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

// ==========================================
// PlannerConfig - 排产配置文档
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    // ===== 产能 =====
    pub intake_capacity: TierCapacity,
    pub dispatch_capacity: TierCapacity,
    pub stabilization_capacity: i64,

    // ===== 存放期限（自然日） =====
    pub max_storage_days: i64,
    pub product_max_storage_days: BTreeMap<String, i64>,

    // ===== 按日期覆写 =====
    pub intake_overrides: Vec<DateTierOverride>,
    pub dispatch_overrides: Vec<DateTierOverride>,
    pub stabilization_overrides: Vec<DateCapacityOverride>,

    // ===== 日历 =====
    pub holidays: Vec<NaiveDate>,
    pub weekend_adjustment: bool,
    pub holiday_adjustment: bool,

    // ===== 报表分类 =====
    /// 产品代码首字符 -> 产品类型标签
    pub product_type_prefixes: BTreeMap<String, String>,

    // ===== 同步组（按顺序处理） =====
    pub sync_groups: Vec<SyncGroupConfig>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let holidays = defaults::HOLIDAYS
            .iter()
            .filter_map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .collect();

        let mut product_type_prefixes = BTreeMap::new();
        product_type_prefixes.insert("P".to_string(), "PALETA".to_string());
        product_type_prefixes.insert("J".to_string(), "JAMON".to_string());

        Self {
            intake_capacity: TierCapacity::new(defaults::CAPACITY_TIER1, defaults::CAPACITY_TIER2),
            dispatch_capacity: TierCapacity::new(defaults::CAPACITY_TIER1, defaults::CAPACITY_TIER2),
            stabilization_capacity: defaults::STABILIZATION_CAPACITY,
            max_storage_days: defaults::MAX_STORAGE_DAYS,
            product_max_storage_days: BTreeMap::new(),
            intake_overrides: Vec::new(),
            dispatch_overrides: Vec::new(),
            stabilization_overrides: Vec::new(),
            holidays,
            weekend_adjustment: true,
            holiday_adjustment: true,
            product_type_prefixes,
            sync_groups: Vec::new(),
        }
    }
}

impl PlannerConfig {
    // ==========================================
    // 校验 + 规范化
    // ==========================================

    /// 校验配置并生成不可变的 PlanSettings
    ///
    /// # 返回
    /// - Ok(PlanSettings): 规范化后的配置（日期键映射、节假日集合）
    /// - Err(ConfigError): 任一字段非法
    pub fn validate(&self) -> ConfigResult<PlanSettings> {
        check_tiers("intake_capacity", &self.intake_capacity)?;
        check_tiers("dispatch_capacity", &self.dispatch_capacity)?;
        check_non_negative("stabilization_capacity", self.stabilization_capacity)?;

        check_storage_days("*", self.max_storage_days)?;
        for (product, days) in &self.product_max_storage_days {
            check_storage_days(product, *days)?;
        }

        let intake_overrides = normalize_tier_overrides("intake", &self.intake_overrides)?;
        let dispatch_overrides = normalize_tier_overrides("dispatch", &self.dispatch_overrides)?;

        let mut stabilization_overrides = BTreeMap::new();
        for ov in &self.stabilization_overrides {
            if ov.capacity < 0 {
                return Err(ConfigError::NegativeOverride {
                    table: "stabilization".to_string(),
                    date: ov.date,
                    value: ov.capacity,
                });
            }
            if stabilization_overrides.insert(ov.date, ov.capacity).is_some() {
                return Err(ConfigError::DuplicateOverrideDate {
                    table: "stabilization".to_string(),
                    date: ov.date,
                });
            }
        }

        let mut product_types = BTreeMap::new();
        for (prefix, label) in &self.product_type_prefixes {
            let mut chars = prefix.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    product_types.insert(c, label.clone());
                }
                _ => return Err(ConfigError::InvalidTypePrefix(prefix.clone())),
            }
        }

        let mut sync_groups = Vec::with_capacity(self.sync_groups.len());
        for (idx, group) in self.sync_groups.iter().enumerate() {
            let name = group
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| format!("GROUP-{}", idx + 1));

            if group.product_codes.is_empty() {
                return Err(ConfigError::EmptySyncGroup(name));
            }

            // 保留配置顺序去重（拆分重试按此顺序）
            let mut seen = BTreeSet::new();
            let mut product_codes = Vec::new();
            for code in &group.product_codes {
                let code = code.trim();
                if code.is_empty() {
                    return Err(ConfigError::BlankProductCode(name));
                }
                if seen.insert(code.to_string()) {
                    product_codes.push(code.to_string());
                }
            }

            sync_groups.push(SyncGroup {
                name,
                product_codes,
                fallback: group.fallback,
            });
        }

        Ok(PlanSettings {
            intake_capacity: self.intake_capacity,
            dispatch_capacity: self.dispatch_capacity,
            stabilization_capacity: self.stabilization_capacity,
            max_storage_days: self.max_storage_days,
            product_max_storage_days: self.product_max_storage_days.clone(),
            intake_overrides,
            dispatch_overrides,
            stabilization_overrides,
            holidays: self.holidays.iter().copied().collect(),
            weekend_adjustment: self.weekend_adjustment,
            holiday_adjustment: self.holiday_adjustment,
            product_types,
            sync_groups,
        })
    }
}

// ==========================================
// 辅助函数
// ==========================================

fn check_non_negative(key: &str, value: i64) -> ConfigResult<()> {
    if value < 0 {
        return Err(ConfigError::NegativeCapacity {
            key: key.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_storage_days(product: &str, value: i64) -> ConfigResult<()> {
    if value < 0 {
        return Err(ConfigError::NegativeStorageDays {
            product: product.to_string(),
            value,
        });
    }
    if value > defaults::STORAGE_DAYS_LIMIT {
        return Err(ConfigError::StorageDaysOutOfRange {
            product: product.to_string(),
            value,
            limit: defaults::STORAGE_DAYS_LIMIT,
        });
    }
    Ok(())
}

fn check_tiers(key: &str, tiers: &TierCapacity) -> ConfigResult<()> {
    check_non_negative(&format!("{}.tier1", key), tiers.tier1)?;
    check_non_negative(&format!("{}.tier2", key), tiers.tier2)
}

fn normalize_tier_overrides(
    table: &str,
    overrides: &[DateTierOverride],
) -> ConfigResult<BTreeMap<NaiveDate, TierOverride>> {
    let mut map = BTreeMap::new();
    for ov in overrides {
        if ov.tier1.is_none() && ov.tier2.is_none() {
            return Err(ConfigError::EmptyOverride {
                table: table.to_string(),
                date: ov.date,
            });
        }
        for value in [ov.tier1, ov.tier2].into_iter().flatten() {
            if value < 0 {
                return Err(ConfigError::NegativeOverride {
                    table: table.to_string(),
                    date: ov.date,
                    value,
                });
            }
        }
        let normalized = TierOverride {
            tier1: ov.tier1,
            tier2: ov.tier2,
        };
        if map.insert(ov.date, normalized).is_some() {
            return Err(ConfigError::DuplicateOverrideDate {
                table: table.to_string(),
                date: ov.date,
            });
        }
    }
    Ok(map)
}
