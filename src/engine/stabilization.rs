// ==========================================
// 批次腌制排产系统 - 稳定库占用跟踪
// ==========================================
// 占用区间: 自然日 [收货日, 入盐日-1]，同日入盐不占用
// 容量: 按日期覆写优先，否则全局基础容量
// 报表: 按日汇总占用、按产品类型拆分、利用率、超出量
// ==========================================

use crate::config::PlanSettings;
use crate::domain::lot::Lot;
use crate::domain::report::StabilizationReportRow;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

// ==========================================
// StabilizationTracker - 稳定库日占用
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct StabilizationTracker {
    base_capacity: i64,
    overrides: BTreeMap<NaiveDate, i64>,
    occupancy: BTreeMap<NaiveDate, i64>,
}

impl StabilizationTracker {
    pub fn new(base_capacity: i64, overrides: BTreeMap<NaiveDate, i64>) -> Self {
        Self {
            base_capacity,
            overrides,
            occupancy: BTreeMap::new(),
        }
    }

    pub fn occupancy(&self, date: NaiveDate) -> i64 {
        self.occupancy.get(&date).copied().unwrap_or(0)
    }

    pub fn effective_capacity(&self, date: NaiveDate) -> i64 {
        self.overrides
            .get(&date)
            .copied()
            .unwrap_or(self.base_capacity)
    }

    /// 区间内每一天追加 quantity 后均不超容量；空区间恒为 true
    pub fn fits_range(&self, start: NaiveDate, end_inclusive: NaiveDate, quantity: i64) -> bool {
        days_between(start, end_inclusive)
            .all(|day| {
                self.occupancy(day)
                    .checked_add(quantity)
                    .is_some_and(|total| total <= self.effective_capacity(day))
            })
    }

    /// 区间内每一天追加 quantity；空区间为 no-op
    pub fn commit_range(&mut self, start: NaiveDate, end_inclusive: NaiveDate, quantity: i64) {
        for day in days_between(start, end_inclusive) {
            let entry = self.occupancy.entry(day).or_insert(0);
            *entry = entry.saturating_add(quantity);
        }
    }

    /// 检查通过才提交；用于同步组的模拟提交
    pub fn try_commit_range(
        &mut self,
        start: NaiveDate,
        end_inclusive: NaiveDate,
        quantity: i64,
    ) -> bool {
        if !self.fits_range(start, end_inclusive, quantity) {
            return false;
        }
        self.commit_range(start, end_inclusive, quantity);
        true
    }

    pub fn iter_occupancy(&self) -> impl Iterator<Item = (NaiveDate, i64)> + '_ {
        self.occupancy.iter().map(|(d, q)| (*d, *q))
    }
}

/// 自然日闭区间迭代；end < start 时为空
fn days_between(start: NaiveDate, end_inclusive: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let span = (end_inclusive - start).num_days();
    (0..=span).map(move |offset| start + Duration::days(offset))
}

// ==========================================
// 日占用报表
// ==========================================

/// 根据最终批次日期生成稳定库日占用报表（仅含有占用的日期，升序）
///
/// 输入不合法的批次不计入，与台账口径一致。
pub fn build_daily_report(lots: &[Lot], settings: &PlanSettings) -> Vec<StabilizationReportRow> {
    let mut totals: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut by_type: BTreeMap<NaiveDate, BTreeMap<String, i64>> = BTreeMap::new();

    for lot in lots.iter().filter(|l| l.input_error().is_none()) {
        let Some((start, end)) = lot.stabilization_range() else {
            continue;
        };
        let product_type = settings.product_type_of(&lot.product_code);
        for day in days_between(start, end) {
            let total = totals.entry(day).or_insert(0);
            *total = total.saturating_add(lot.quantity);
            let typed = by_type
                .entry(day)
                .or_default()
                .entry(product_type.to_string())
                .or_insert(0);
            *typed = typed.saturating_add(lot.quantity);
        }
    }

    totals
        .into_iter()
        .map(|(date, total_units)| {
            let capacity = settings
                .stabilization_overrides
                .get(&date)
                .copied()
                .unwrap_or(settings.stabilization_capacity);

            // 所有配置的类型都输出，便于导出列对齐
            let mut units_by_product_type: BTreeMap<String, i64> = settings
                .product_types
                .values()
                .map(|label| (label.clone(), 0))
                .collect();
            if let Some(split) = by_type.remove(&date) {
                for (label, units) in split {
                    let entry = units_by_product_type.entry(label).or_insert(0);
                    *entry = entry.saturating_add(units);
                }
            }

            let utilization_pct = if capacity > 0 {
                Some((total_units as f64 / capacity as f64 * 1000.0).round() / 10.0)
            } else {
                None
            };

            StabilizationReportRow {
                date,
                total_units,
                units_by_product_type,
                capacity,
                utilization_pct,
                excess_units: total_units.saturating_sub(capacity).max(0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_fits_range_empty_range_always_fits() {
        let tracker = StabilizationTracker::new(0, BTreeMap::new());
        assert!(tracker.fits_range(d(2025, 9, 8), d(2025, 9, 7), 1_000));
        assert!(!tracker.fits_range(d(2025, 9, 8), d(2025, 9, 8), 1));
    }

    #[test]
    fn test_huge_quantity_rejected_without_overflow() {
        let mut tracker = StabilizationTracker::new(i64::MAX, BTreeMap::new());
        tracker.commit_range(d(2025, 9, 8), d(2025, 9, 9), i64::MAX);
        assert!(!tracker.fits_range(d(2025, 9, 8), d(2025, 9, 9), 1));
        assert!(!tracker.try_commit_range(d(2025, 9, 9), d(2025, 9, 9), i64::MAX));
        tracker.commit_range(d(2025, 9, 9), d(2025, 9, 9), i64::MAX);
        assert_eq!(tracker.occupancy(d(2025, 9, 9)), i64::MAX);
    }

    #[test]
    fn test_commit_range_and_override_capacity() {
        let mut overrides = BTreeMap::new();
        overrides.insert(d(2025, 9, 9), 120);
        let mut tracker = StabilizationTracker::new(200, overrides);

        tracker.commit_range(d(2025, 9, 8), d(2025, 9, 10), 100);
        assert_eq!(tracker.occupancy(d(2025, 9, 8)), 100);
        assert_eq!(tracker.occupancy(d(2025, 9, 10)), 100);
        assert_eq!(tracker.occupancy(d(2025, 9, 11)), 0);

        // 09-09 覆写为 120: 100 + 30 超出
        assert!(!tracker.fits_range(d(2025, 9, 8), d(2025, 9, 10), 30));
        assert!(tracker.fits_range(d(2025, 9, 10), d(2025, 9, 10), 100));
        assert!(!tracker.try_commit_range(d(2025, 9, 9), d(2025, 9, 9), 21));
        assert!(tracker.try_commit_range(d(2025, 9, 9), d(2025, 9, 9), 20));
        assert_eq!(tracker.occupancy(d(2025, 9, 9)), 120);

        // 空区间 no-op
        tracker.commit_range(d(2025, 9, 12), d(2025, 9, 11), 999);
        assert_eq!(tracker.iter_occupancy().count(), 3);
    }

    #[test]
    fn test_daily_report_split_utilization_and_excess() {
        let mut config = PlannerConfig::default();
        config.stabilization_capacity = 300;
        config.stabilization_overrides.push(crate::config::DateCapacityOverride {
            date: d(2025, 9, 9),
            capacity: 100,
        });
        let settings = config.validate().unwrap();

        let lots = vec![
            Lot::new("A", Some(d(2025, 9, 8)), 100, "P01", Some(7))
                .with_assignment(Some(d(2025, 9, 10)), None),
            Lot::new("B", Some(d(2025, 9, 9)), 50, "J01", Some(7))
                .with_assignment(Some(d(2025, 9, 10)), None),
            Lot::new("C", Some(d(2025, 9, 9)), 25, "X01", Some(7))
                .with_assignment(Some(d(2025, 9, 10)), None),
            // 同日入盐不占用
            Lot::new("D", Some(d(2025, 9, 10)), 500, "P01", Some(7))
                .with_assignment(Some(d(2025, 9, 10)), None),
            // 输入非法不计入
            Lot::new("E", Some(d(2025, 9, 8)), 0, "P01", Some(7))
                .with_assignment(Some(d(2025, 9, 10)), None),
        ];

        let report = build_daily_report(&lots, &settings);
        assert_eq!(report.len(), 2);

        let first = &report[0];
        assert_eq!(first.date, d(2025, 9, 8));
        assert_eq!(first.total_units, 100);
        assert_eq!(first.units_by_product_type.get("PALETA"), Some(&100));
        assert_eq!(first.units_by_product_type.get("JAMON"), Some(&0));
        assert_eq!(first.capacity, 300);
        assert_eq!(first.utilization_pct, Some(33.3));
        assert_eq!(first.excess_units, 0);

        let second = &report[1];
        assert_eq!(second.total_units, 175);
        assert_eq!(second.units_by_product_type.get("JAMON"), Some(&50));
        assert_eq!(second.units_by_product_type.get("OTHER"), Some(&25));
        assert_eq!(second.capacity, 100);
        assert_eq!(second.utilization_pct, Some(175.0));
        assert_eq!(second.excess_units, 75);
    }
}
