// ==========================================
// 批次腌制排产系统 - 同步组统一入盐引擎
// ==========================================
// 职责: 逐批次排产之前，为配置的产品组寻找统一入盐日期
// 可行性: 入盐合计产能 + 稳定库模拟提交 + 逐批次出盐模拟
// 失败策略: mark-unfit-on-failure / retry-independently / skip
// 红线: 模拟只作用于台账副本，成功后才正式提交
// ==========================================

use crate::domain::lot::Lot;
use crate::domain::types::{CapacityTier, FallbackPolicy, PlacementOrigin, UnfitReason};
use crate::engine::context::{LotRequest, SchedulingContext};
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

// ==========================================
// 组处理结果
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupResolution {
    /// 组内无待排批次
    NoPendingLots,
    /// 找到统一入盐日期并已提交
    Synchronized { intake: NaiveDate, tier: CapacityTier },
    /// 联合排产失败，全组标记不可排
    MarkedUnfit,
    /// 联合排产失败，已按产品代码拆分重试（拆分结果另行记录）
    RetriedIndependently,
    /// 联合排产失败，留给逐批次排产
    LeftForScheduler,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutcome {
    pub group: String,
    pub lot_count: usize,
    pub resolution: GroupResolution,
}

// ==========================================
// GroupSyncResolver - 同步组引擎
// ==========================================
pub struct GroupSyncResolver {
    // 无状态引擎
}

impl GroupSyncResolver {
    pub fn new() -> Self {
        Self {}
    }

    /// 按配置顺序处理全部同步组
    ///
    /// # 返回
    /// 每个组（含拆分重试产生的子组）一条处理记录，按处理顺序排列
    #[instrument(skip(self, ctx, lots), fields(groups = ctx.settings.sync_groups.len()))]
    pub fn resolve_all(&self, ctx: &mut SchedulingContext, lots: &mut [Lot]) -> Vec<GroupOutcome> {
        let settings = ctx.settings;
        let mut outcomes = Vec::new();

        for group in &settings.sync_groups {
            self.resolve_group(
                ctx,
                lots,
                &group.name,
                &group.product_codes,
                group.fallback,
                &mut outcomes,
            );
        }
        outcomes
    }

    /// 处理单个组（拆分重试时递归调用，子组策略固定为 skip）
    fn resolve_group(
        &self,
        ctx: &mut SchedulingContext,
        lots: &mut [Lot],
        name: &str,
        product_codes: &[String],
        fallback: FallbackPolicy,
        outcomes: &mut Vec<GroupOutcome>,
    ) {
        let in_group = |lot: &Lot| product_codes.iter().any(|c| *c == lot.product_code);

        let requests: Vec<LotRequest> = lots
            .iter()
            .enumerate()
            .filter(|(_, lot)| lot.is_pending() && in_group(*lot))
            .filter_map(|(index, lot)| LotRequest::from_lot(index, lot, ctx.settings))
            .collect();

        if requests.is_empty() {
            debug!(group = name, "同步组无待排批次");
            outcomes.push(GroupOutcome {
                group: name.to_string(),
                lot_count: 0,
                resolution: GroupResolution::NoPendingLots,
            });
            return;
        }

        // 组内已有入盐日期的批次（输入已排或前序组已排）作为优先候选
        let preferred = lots
            .iter()
            .filter(|lot| in_group(*lot) && lot.input_error().is_none())
            .find_map(|lot| lot.intake_date);

        if let Some((intake, dispatches, tier)) = self.find_common_date(ctx, &requests, preferred) {
            for (request, dispatch) in requests.iter().zip(dispatches) {
                ctx.commit_placement(request, intake, dispatch);
                lots[request.index].place(
                    intake,
                    dispatch,
                    PlacementOrigin::GroupSync {
                        group: name.to_string(),
                        tier,
                    },
                );
            }
            info!(group = name, lots = requests.len(), %intake, %tier, "同步组统一入盐成功");
            outcomes.push(GroupOutcome {
                group: name.to_string(),
                lot_count: requests.len(),
                resolution: GroupResolution::Synchronized { intake, tier },
            });
            return;
        }

        let resolution = match fallback {
            FallbackPolicy::MarkUnfitOnFailure => {
                for request in &requests {
                    lots[request.index].mark_unfit(UnfitReason::GroupInfeasible {
                        group: name.to_string(),
                    });
                }
                GroupResolution::MarkedUnfit
            }
            FallbackPolicy::RetryIndependently if product_codes.len() > 1 => {
                GroupResolution::RetriedIndependently
            }
            FallbackPolicy::RetryIndependently | FallbackPolicy::Skip => {
                GroupResolution::LeftForScheduler
            }
        };
        info!(group = name, lots = requests.len(), policy = %fallback, "同步组统一入盐失败");
        outcomes.push(GroupOutcome {
            group: name.to_string(),
            lot_count: requests.len(),
            resolution: resolution.clone(),
        });

        if resolution == GroupResolution::RetriedIndependently {
            for code in product_codes {
                let sub_name = format!("{}/{}", name, code);
                self.resolve_group(
                    ctx,
                    lots,
                    &sub_name,
                    std::slice::from_ref(code),
                    FallbackPolicy::Skip,
                    outcomes,
                );
            }
        }
    }

    // ==========================================
    // 联合可行性搜索
    // ==========================================

    /// 在组窗口内搜索统一入盐日期
    ///
    /// # 返回
    /// - Some((入盐日, 各批次出盐日, 档位)): 出盐日与 requests 顺序一致
    /// - None: 两档均无可行日期，或组窗口为空
    pub fn find_common_date(
        &self,
        ctx: &SchedulingContext,
        requests: &[LotRequest],
        preferred: Option<NaiveDate>,
    ) -> Option<(NaiveDate, Vec<NaiveDate>, CapacityTier)> {
        let window_start = requests
            .iter()
            .map(|r| ctx.earliest_intake(r))
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .max()?;
        let window_end = requests.iter().map(LotRequest::latest_intake).min()?;

        if window_start > window_end {
            debug!(%window_start, %window_end, "组窗口为空");
            return None;
        }

        let preferred = preferred.filter(|p| {
            *p >= window_start && *p <= window_end && ctx.calendar.is_business_day(*p)
        });

        let mut candidates: Vec<NaiveDate> = preferred.into_iter().collect();
        let mut day = Some(window_start);
        while let Some(current) = day.filter(|d| *d <= window_end) {
            if Some(current) != preferred {
                candidates.push(current);
            }
            day = ctx.calendar.next_business_day(current);
        }

        for tier in CapacityTier::ATTEMPTS {
            for &candidate in &candidates {
                if let Some(dispatches) = self.try_candidate(ctx, requests, candidate, tier) {
                    return Some((candidate, dispatches, tier));
                }
            }
        }
        None
    }

    /// 单个候选日期的联合检查，全部在台账副本上进行
    fn try_candidate(
        &self,
        ctx: &SchedulingContext,
        requests: &[LotRequest],
        candidate: NaiveDate,
        tier: CapacityTier,
    ) -> Option<Vec<NaiveDate>> {
        let Some(total) = requests
            .iter()
            .try_fold(0i64, |acc, r| acc.checked_add(r.quantity))
        else {
            debug!(%candidate, "组数量合计溢出");
            return None;
        };
        if !ctx.intake.would_fit(candidate, total, tier) {
            debug!(%candidate, %tier, total, "组入盐合计超出产能");
            return None;
        }

        let mut tracker = ctx.stabilization.clone();
        for request in requests {
            let Some((start, end)) = request.stabilization_range(candidate) else {
                continue;
            };
            if !tracker.try_commit_range(start, end, request.quantity) {
                debug!(%candidate, %tier, "组稳定库模拟超出容量");
                return None;
            }
        }

        let mut dispatch_ledger = ctx.dispatch.clone();
        let mut dispatches = Vec::with_capacity(requests.len());
        for request in requests {
            let dispatch =
                ctx.adjusted_dispatch(candidate, request.target_dwell_days, &dispatch_ledger)?;
            if !dispatch_ledger.would_fit(dispatch, request.quantity, tier) {
                debug!(%candidate, %dispatch, %tier, "组出盐模拟超出产能");
                return None;
            }
            dispatch_ledger.commit(dispatch, request.quantity);
            dispatches.push(dispatch);
        }

        Some(dispatches)
    }
}

impl Default for GroupSyncResolver {
    fn default() -> Self {
        Self::new()
    }
}
