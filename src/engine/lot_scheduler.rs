// ==========================================
// 批次腌制排产系统 - 逐批次贪心排产引擎
// ==========================================
// 职责: 按输入顺序为每个待排批次确定入盐/出盐日期
// 约束: 入盐日产能 + 稳定库区间容量 + 出盐日产能
// 顺序: 第1档产能在整个存放窗口内搜索失败后才尝试第2档
// 红线: 贪心、顺序敏感，不做全局优化
// ==========================================

use crate::domain::lot::Lot;
use crate::domain::types::{CapacityTier, PlacementOrigin, UnfitReason};
use crate::engine::context::{LotRequest, SchedulingContext};
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

/// 单批次排产结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub intake: NaiveDate,
    pub dispatch: NaiveDate,
    pub tier: CapacityTier,
}

/// 逐批次排产统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleStats {
    pub placed_tier1: usize,
    pub placed_tier2: usize,
    pub unfit: usize,
}

// ==========================================
// LotScheduler - 逐批次排产引擎
// ==========================================
pub struct LotScheduler {
    // 无状态引擎，台账由上下文持有
}

impl LotScheduler {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 为单个批次搜索可行日期（不提交）
    ///
    /// 规则：
    /// 1) 起点 = 收货日（工作日）或其后第一个工作日
    /// 2) 对每一档产能，在 (候选 - 收货) <= 最大存放天数 的范围内逐个工作日尝试
    /// 3) 候选需同时满足：入盐产能、稳定库 [收货, 候选-1]、调整后出盐日产能
    pub fn find_placement(&self, ctx: &SchedulingContext, request: &LotRequest) -> Option<Placement> {
        let start = ctx.earliest_intake(request)?;

        for tier in CapacityTier::ATTEMPTS {
            let mut candidate = Some(start);
            while let Some(day) = candidate.filter(|c| request.within_storage_window(*c)) {
                if let Some(dispatch) = self.try_candidate(ctx, request, day, tier) {
                    return Some(Placement {
                        intake: day,
                        dispatch,
                        tier,
                    });
                }
                candidate = ctx.calendar.next_business_day(day);
            }
        }
        None
    }

    /// 检查单个候选入盐日，可行时返回调整后的出盐日
    fn try_candidate(
        &self,
        ctx: &SchedulingContext,
        request: &LotRequest,
        candidate: NaiveDate,
        tier: CapacityTier,
    ) -> Option<NaiveDate> {
        if !ctx.intake.would_fit(candidate, request.quantity, tier) {
            debug!(%candidate, %tier, "入盐产能不足");
            return None;
        }

        if let Some((start, end)) = request.stabilization_range(candidate) {
            if !ctx.stabilization.fits_range(start, end, request.quantity) {
                debug!(%candidate, %tier, "稳定库容量不足");
                return None;
            }
        }

        let Some(dispatch) =
            ctx.adjusted_dispatch(candidate, request.target_dwell_days, &ctx.dispatch)
        else {
            debug!(%candidate, target_dwell_days = request.target_dwell_days, "出盐日期超出可表示范围");
            return None;
        };
        if !ctx.dispatch.would_fit(dispatch, request.quantity, tier) {
            debug!(%candidate, %dispatch, %tier, "出盐产能不足");
            return None;
        }

        Some(dispatch)
    }

    /// 为所有待排批次按输入顺序排产，并正式提交台账
    #[instrument(skip(self, ctx, lots), fields(lots_count = lots.len()))]
    pub fn schedule_pending(&self, ctx: &mut SchedulingContext, lots: &mut [Lot]) -> ScheduleStats {
        let mut stats = ScheduleStats::default();

        for (index, lot) in lots.iter_mut().enumerate() {
            if !lot.is_pending() {
                continue;
            }
            let Some(request) = LotRequest::from_lot(index, lot, ctx.settings) else {
                continue;
            };

            match self.find_placement(ctx, &request) {
                Some(placement) => {
                    ctx.commit_placement(&request, placement.intake, placement.dispatch);
                    lot.place(
                        placement.intake,
                        placement.dispatch,
                        PlacementOrigin::Individual { tier: placement.tier },
                    );
                    match placement.tier {
                        CapacityTier::First => stats.placed_tier1 += 1,
                        CapacityTier::Second => stats.placed_tier2 += 1,
                    }
                    debug!(
                        lot_id = %lot.lot_id,
                        intake = %placement.intake,
                        dispatch = %placement.dispatch,
                        tier = %placement.tier,
                        "批次已排入"
                    );
                }
                None => {
                    lot.mark_unfit(UnfitReason::NoCapacity);
                    stats.unfit += 1;
                    debug!(
                        lot_id = %lot.lot_id,
                        reception_date = %request.reception_date,
                        quantity = request.quantity,
                        "批次无法排入"
                    );
                }
            }
        }

        info!(
            placed_tier1 = stats.placed_tier1,
            placed_tier2 = stats.placed_tier2,
            unfit = stats.unfit,
            "逐批次排产完成"
        );
        stats
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for LotScheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DateTierOverride, PlanSettings, PlannerConfig};
    use crate::domain::types::FitFlag;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// 小产能配置：入盐/出盐 100/150，稳定库 1000，无节假日
    fn small_settings() -> PlanSettings {
        let mut config = PlannerConfig::default();
        config.intake_capacity.tier1 = 100;
        config.intake_capacity.tier2 = 150;
        config.dispatch_capacity.tier1 = 100;
        config.dispatch_capacity.tier2 = 150;
        config.stabilization_capacity = 1000;
        config.holidays.clear();
        config.validate().unwrap()
    }

    #[test]
    fn test_full_monday_pushes_to_tuesday() {
        // 2025-09-08 周一
        let settings = small_settings();
        let mut ctx = SchedulingContext::new(&settings);
        let mut lots = vec![
            Lot::new("A", Some(d(2025, 9, 8)), 100, "P01", Some(7))
                .with_assignment(Some(d(2025, 9, 8)), Some(d(2025, 9, 15))),
            Lot::new("B", Some(d(2025, 9, 8)), 50, "P01", Some(7)),
        ];
        ctx.seed(&lots);
        lots[0].place(d(2025, 9, 8), d(2025, 9, 15), PlacementOrigin::Preassigned);

        let stats = LotScheduler::new().schedule_pending(&mut ctx, &mut lots);

        assert_eq!(stats.placed_tier1, 1);
        assert_eq!(lots[1].intake_date, Some(d(2025, 9, 9)));
        assert_eq!(lots[1].dispatch_date, Some(d(2025, 9, 16)));
        assert_eq!(lots[1].pre_storage_days, Some(1));
        // 稳定库占用 09-08 一天
        assert_eq!(ctx.stabilization.occupancy(d(2025, 9, 8)), 50);
        assert_eq!(ctx.stabilization.occupancy(d(2025, 9, 9)), 0);
    }

    #[test]
    fn test_weekend_reception_starts_next_business_day() {
        let settings = small_settings();
        let mut ctx = SchedulingContext::new(&settings);
        // 2025-09-06 周六
        let mut lots = vec![Lot::new("A", Some(d(2025, 9, 6)), 10, "P01", Some(3))];

        LotScheduler::new().schedule_pending(&mut ctx, &mut lots);

        assert_eq!(lots[0].intake_date, Some(d(2025, 9, 8)));
        // 09-11 周四
        assert_eq!(lots[0].dispatch_date, Some(d(2025, 9, 11)));
        assert_eq!(ctx.stabilization.occupancy(d(2025, 9, 6)), 10);
        assert_eq!(ctx.stabilization.occupancy(d(2025, 9, 7)), 10);
    }

    #[test]
    fn test_tier2_only_after_tier1_window_exhausted() {
        let mut config = PlannerConfig::default();
        config.intake_capacity.tier1 = 100;
        config.intake_capacity.tier2 = 200;
        config.max_storage_days = 1;
        config.holidays.clear();
        let settings = config.validate().unwrap();
        let mut ctx = SchedulingContext::new(&settings);

        // 周一/周二入盐各已有 100
        ctx.intake.commit(d(2025, 9, 8), 100);
        ctx.intake.commit(d(2025, 9, 9), 100);
        let mut lots = vec![Lot::new("A", Some(d(2025, 9, 8)), 50, "P01", Some(2))];

        let stats = LotScheduler::new().schedule_pending(&mut ctx, &mut lots);

        assert_eq!(stats.placed_tier2, 1);
        assert_eq!(lots[0].intake_date, Some(d(2025, 9, 8)));
        assert_eq!(
            lots[0].origin,
            Some(PlacementOrigin::Individual { tier: CapacityTier::Second })
        );
    }

    #[test]
    fn test_stabilization_blocks_later_candidates() {
        let mut config = PlannerConfig::default();
        config.intake_capacity.tier1 = 100;
        config.intake_capacity.tier2 = 100;
        config.stabilization_capacity = 0;
        config.holidays.clear();
        let settings = config.validate().unwrap();
        let mut ctx = SchedulingContext::new(&settings);
        ctx.intake.commit(d(2025, 9, 8), 100);

        // 当日入盐已满，顺延需占用稳定库，容量 0 → 不可排
        let mut lots = vec![Lot::new("A", Some(d(2025, 9, 8)), 10, "P01", Some(2))];
        let stats = LotScheduler::new().schedule_pending(&mut ctx, &mut lots);

        assert_eq!(stats.unfit, 1);
        assert_eq!(lots[0].fit_flag, Some(FitFlag::Unfit));
        assert_eq!(lots[0].unfit_reason, Some(UnfitReason::NoCapacity));
        assert_eq!(lots[0].intake_date, None);
    }

    #[test]
    fn test_dispatch_override_forces_next_candidate() {
        let mut config = PlannerConfig::default();
        config.dispatch_overrides.push(DateTierOverride {
            date: d(2025, 9, 15),
            tier1: Some(0),
            tier2: Some(0),
        });
        config.holidays.clear();
        let settings = config.validate().unwrap();
        let mut ctx = SchedulingContext::new(&settings);

        let mut lots = vec![Lot::new("A", Some(d(2025, 9, 8)), 10, "P01", Some(7))];
        LotScheduler::new().schedule_pending(&mut ctx, &mut lots);

        // 周一入盐 → 出盐 09-15 被封 → 周二入盐 → 09-16 出盐
        assert_eq!(lots[0].intake_date, Some(d(2025, 9, 9)));
        assert_eq!(lots[0].dispatch_date, Some(d(2025, 9, 16)));
        assert_eq!(ctx.dispatch.committed(d(2025, 9, 15)), 0);
    }

    #[test]
    fn test_storage_window_counts_natural_days() {
        let mut config = PlannerConfig::default();
        config.intake_capacity.tier1 = 0;
        config.intake_capacity.tier2 = 0;
        config.intake_overrides.push(DateTierOverride {
            date: d(2025, 9, 8),
            tier1: Some(100),
            tier2: None,
        });
        config.max_storage_days = 2;
        config.holidays.clear();
        let settings = config.validate().unwrap();
        let ctx = SchedulingContext::new(&settings);

        // 周六收货，窗口 09-06..09-08，周一可入
        let ok = LotRequest::from_lot(0, &Lot::new("A", Some(d(2025, 9, 6)), 10, "P01", Some(0)), &settings).unwrap();
        let placement = LotScheduler::new().find_placement(&ctx, &ok).unwrap();
        assert_eq!(placement.intake, d(2025, 9, 8));
        assert_eq!(placement.dispatch, d(2025, 9, 8));

        // 周五收货，窗口 09-05..09-07，周一超出
        let late = LotRequest::from_lot(0, &Lot::new("B", Some(d(2025, 9, 5)), 10, "P01", Some(0)), &settings).unwrap();
        assert!(LotScheduler::new().find_placement(&ctx, &late).is_none());
    }
}
