// ==========================================
// 批次腌制排产系统 - 排产上下文
// ==========================================
// 职责: 持有单次运行的配置 + 日历 + 三个台账
// 红线: 无模块级可变状态；运行结束即丢弃
// ==========================================

use crate::config::PlanSettings;
use crate::domain::lot::Lot;
use crate::domain::types::Stage;
use crate::engine::calendar::BusinessCalendar;
use crate::engine::capacity_ledger::CapacityLedger;
use crate::engine::stabilization::StabilizationTracker;
use chrono::{Duration, NaiveDate};
use tracing::debug;

// ==========================================
// LotRequest - 合法批次的排产视图
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotRequest {
    pub index: usize,
    pub reception_date: NaiveDate,
    pub quantity: i64,
    pub target_dwell_days: i64,
    pub max_storage_days: i64,
}

impl LotRequest {
    /// 仅对输入合法的批次返回 Some
    pub fn from_lot(index: usize, lot: &Lot, settings: &PlanSettings) -> Option<Self> {
        if lot.input_error().is_some() {
            return None;
        }
        Some(Self {
            index,
            reception_date: lot.reception_date?,
            quantity: lot.quantity,
            target_dwell_days: lot.target_dwell_days?,
            max_storage_days: settings.max_storage_days_for(&lot.product_code),
        })
    }

    /// 允许的最晚入盐日期（自然日），超出日期表示范围时取 `NaiveDate::MAX`
    pub fn latest_intake(&self) -> NaiveDate {
        Duration::try_days(self.max_storage_days)
            .and_then(|days| self.reception_date.checked_add_signed(days))
            .unwrap_or(NaiveDate::MAX)
    }

    /// 以 `intake` 入盐时的稳定库占用区间 [收货, 入盐-1]；同日入盐时为 None
    pub fn stabilization_range(&self, intake: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        if intake <= self.reception_date {
            return None;
        }
        Some((self.reception_date, intake.pred_opt()?))
    }

    pub fn within_storage_window(&self, candidate: NaiveDate) -> bool {
        (candidate - self.reception_date).num_days() <= self.max_storage_days
    }
}

/// 台账初始化统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub intake_lots: usize,
    pub dispatch_lots: usize,
    pub stabilization_lots: usize,
}

// ==========================================
// SchedulingContext - 排产上下文
// ==========================================
#[derive(Debug, Clone)]
pub struct SchedulingContext<'a> {
    pub settings: &'a PlanSettings,
    pub calendar: BusinessCalendar,
    pub intake: CapacityLedger,
    pub dispatch: CapacityLedger,
    pub stabilization: StabilizationTracker,
}

impl<'a> SchedulingContext<'a> {
    /// 创建空台账
    pub fn new(settings: &'a PlanSettings) -> Self {
        Self {
            settings,
            calendar: BusinessCalendar::new(settings.holidays.clone()),
            intake: CapacityLedger::new(
                Stage::Intake,
                settings.global_capacity(Stage::Intake),
                settings.overrides(Stage::Intake).clone(),
            ),
            dispatch: CapacityLedger::new(
                Stage::Dispatch,
                settings.global_capacity(Stage::Dispatch),
                settings.overrides(Stage::Dispatch).clone(),
            ),
            stabilization: StabilizationTracker::new(
                settings.stabilization_capacity,
                settings.stabilization_overrides.clone(),
            ),
        }
    }

    pub fn ledger(&self, stage: Stage) -> &CapacityLedger {
        match stage {
            Stage::Intake => &self.intake,
            Stage::Dispatch => &self.dispatch,
        }
    }

    /// 已有日期的合法批次一次性计入台账
    ///
    /// - 入盐台账: 有入盐日期的批次
    /// - 出盐台账: 有出盐日期的批次
    /// - 稳定库: 入盐日期严格晚于收货日期的批次，占用 [收货, 入盐-1]
    pub fn seed(&mut self, lots: &[Lot]) -> SeedSummary {
        let mut summary = SeedSummary::default();

        for lot in lots.iter().filter(|l| l.input_error().is_none()) {
            if let Some(intake) = lot.intake_date {
                self.intake.commit(intake, lot.quantity);
                summary.intake_lots += 1;
            }
            if let Some(dispatch) = lot.dispatch_date {
                self.dispatch.commit(dispatch, lot.quantity);
                summary.dispatch_lots += 1;
            }
            if let Some((start, end)) = lot.stabilization_range() {
                self.stabilization.commit_range(start, end, lot.quantity);
                summary.stabilization_lots += 1;
            }
        }

        debug!(
            intake_lots = summary.intake_lots,
            dispatch_lots = summary.dispatch_lots,
            stabilization_lots = summary.stabilization_lots,
            "台账初始化完成"
        );
        summary
    }

    /// 最早可入盐日期：收货日为工作日则当日，否则顺延
    pub fn earliest_intake(&self, request: &LotRequest) -> Option<NaiveDate> {
        self.calendar.on_or_after(request.reception_date)
    }

    /// 入盐日 + 目标天数，再按周末/节假日规则调整
    ///
    /// 节假日择日读取 `dispatch_ledger` 的负荷（可以是模拟台账）
    ///
    /// 目标天数过大、出盐日期无法表示时返回 None，该候选日不可用
    pub fn adjusted_dispatch(
        &self,
        intake: NaiveDate,
        target_dwell_days: i64,
        dispatch_ledger: &CapacityLedger,
    ) -> Option<NaiveDate> {
        let target = Duration::try_days(target_dwell_days)
            .and_then(|days| intake.checked_add_signed(days))?;
        self.calendar.adjust_dispatch(
            target,
            self.settings.weekend_adjustment,
            self.settings.holiday_adjustment,
            |day| dispatch_ledger.committed(day),
        )
    }

    /// 正式提交一个批次的三项占用
    pub fn commit_placement(&mut self, request: &LotRequest, intake: NaiveDate, dispatch: NaiveDate) {
        self.intake.commit(intake, request.quantity);
        self.dispatch.commit(dispatch, request.quantity);
        if let Some((start, end)) = request.stabilization_range(intake) {
            self.stabilization.commit_range(start, end, request.quantity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_seed_skips_invalid_and_same_day_stabilization() {
        let settings = PlannerConfig::default().validate().unwrap();
        let mut ctx = SchedulingContext::new(&settings);

        let lots = vec![
            Lot::new("A", Some(d(2025, 9, 6)), 100, "P01", Some(7))
                .with_assignment(Some(d(2025, 9, 8)), Some(d(2025, 9, 15))),
            Lot::new("B", Some(d(2025, 9, 8)), 40, "P01", Some(7))
                .with_assignment(Some(d(2025, 9, 8)), None),
            Lot::new("C", None, 999, "P01", Some(7))
                .with_assignment(Some(d(2025, 9, 8)), Some(d(2025, 9, 15))),
        ];

        let summary = ctx.seed(&lots);
        assert_eq!(summary, SeedSummary { intake_lots: 2, dispatch_lots: 1, stabilization_lots: 1 });
        assert_eq!(ctx.intake.committed(d(2025, 9, 8)), 140);
        assert_eq!(ctx.dispatch.committed(d(2025, 9, 15)), 100);
        assert_eq!(ctx.stabilization.occupancy(d(2025, 9, 6)), 100);
        assert_eq!(ctx.stabilization.occupancy(d(2025, 9, 7)), 100);
        assert_eq!(ctx.stabilization.occupancy(d(2025, 9, 8)), 0);
    }

    #[test]
    fn test_lot_request_window_uses_product_override() {
        let mut config = PlannerConfig::default();
        config.product_max_storage_days.insert("J10".to_string(), 2);
        let settings = config.validate().unwrap();

        let lot = Lot::new("A", Some(d(2025, 9, 6)), 10, "J10", Some(7));
        let req = LotRequest::from_lot(0, &lot, &settings).unwrap();
        assert_eq!(req.latest_intake(), d(2025, 9, 8));
        assert!(req.within_storage_window(d(2025, 9, 8)));
        assert!(!req.within_storage_window(d(2025, 9, 9)));

        let invalid = Lot::new("B", Some(d(2025, 9, 6)), -1, "J10", Some(7));
        assert!(LotRequest::from_lot(1, &invalid, &settings).is_none());
    }

    #[test]
    fn test_unrepresentable_dates_are_none_not_panic() {
        let settings = PlannerConfig::default().validate().unwrap();
        let ctx = SchedulingContext::new(&settings);

        assert_eq!(ctx.adjusted_dispatch(d(2025, 9, 8), 1_000_000_000, &ctx.dispatch), None);
        assert_eq!(ctx.adjusted_dispatch(d(2025, 9, 8), i64::MAX, &ctx.dispatch), None);
        assert_eq!(ctx.adjusted_dispatch(d(2025, 9, 8), 7, &ctx.dispatch), Some(d(2025, 9, 15)));

        let near_end = LotRequest {
            index: 0,
            reception_date: NaiveDate::MAX,
            quantity: 10,
            target_dwell_days: 0,
            max_storage_days: 5,
        };
        assert_eq!(near_end.latest_intake(), NaiveDate::MAX);
    }
}
