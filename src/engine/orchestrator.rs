// ==========================================
// 批次腌制排产系统 - 引擎编排器
// ==========================================
// 用途: 协调单次排产运行的执行顺序
// 流程: 输入校验 → 台账初始化 → 同步组 → 逐批次排产 → 标注 → 报表
// 红线: 配置非法时在任何记账之前失败；不可排入不是错误
// ==========================================

use crate::config::{ConfigResult, PlanSettings, PlannerConfig};
use crate::domain::lot::Lot;
use crate::domain::report::{DailyLoadRow, StabilizationReportRow};
use crate::domain::types::{CapacityTier, FitFlag, PlacementOrigin, UnfitReason};
use crate::engine::annotator::OutputAnnotator;
use crate::engine::context::SchedulingContext;
use crate::engine::group_sync::{GroupOutcome, GroupSyncResolver};
use crate::engine::load_summary::build_load_summary;
use crate::engine::lot_scheduler::LotScheduler;
use crate::engine::stabilization::build_daily_report;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// PlanSummary - 运行统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total: usize,
    pub preassigned: usize,
    pub group_placed: usize,
    pub individually_placed: usize,
    /// 使用第2档产能排入的批次（同步组 + 逐批次）
    pub tier2_placements: usize,
    /// 不可排（含输入非法）
    pub unfit: usize,
    pub invalid: usize,
}

impl PlanSummary {
    /// 从最终批次状态统计
    pub fn from_lots(lots: &[Lot]) -> Self {
        let mut summary = PlanSummary {
            total: lots.len(),
            ..Default::default()
        };

        for lot in lots {
            match &lot.origin {
                Some(PlacementOrigin::Preassigned) => summary.preassigned += 1,
                Some(PlacementOrigin::GroupSync { .. }) => summary.group_placed += 1,
                Some(PlacementOrigin::Individual { .. }) => summary.individually_placed += 1,
                None => {}
            }
            if lot.origin.as_ref().and_then(PlacementOrigin::tier) == Some(CapacityTier::Second) {
                summary.tier2_placements += 1;
            }
            if lot.fit_flag == Some(FitFlag::Unfit) {
                summary.unfit += 1;
            }
            if matches!(lot.unfit_reason, Some(UnfitReason::InvalidInput { .. })) {
                summary.invalid += 1;
            }
        }
        summary
    }
}

// ==========================================
// PlanResult - 排产结果
// ==========================================
#[derive(Debug, Clone)]
pub struct PlanResult {
    pub run_id: String,
    /// 标注后的批次，保持输入顺序
    pub lots: Vec<Lot>,
    pub stabilization_report: Vec<StabilizationReportRow>,
    pub load_summary: Vec<DailyLoadRow>,
    pub group_outcomes: Vec<GroupOutcome>,
    pub summary: PlanSummary,
}

// ==========================================
// PlanOrchestrator - 引擎编排器
// ==========================================
pub struct PlanOrchestrator {
    resolver: GroupSyncResolver,
    scheduler: LotScheduler,
}

impl PlanOrchestrator {
    /// 创建新的编排器实例
    pub fn new() -> Self {
        Self {
            resolver: GroupSyncResolver::new(),
            scheduler: LotScheduler::new(),
        }
    }

    /// 校验原始配置后执行排产
    ///
    /// # 返回
    /// - Err(ConfigError): 配置非法，未做任何记账
    pub fn run_with_config(&self, lots: Vec<Lot>, config: &PlannerConfig) -> ConfigResult<PlanResult> {
        let settings = config.validate()?;
        Ok(self.run(lots, &settings))
    }

    /// 执行完整排产流程
    ///
    /// # 参数
    /// - lots: 输入批次（顺序即处理顺序）
    /// - settings: 已校验的配置
    ///
    /// # 返回
    /// 排产结果；不可排入的批次以 Unfit 标注，不会中断运行
    pub fn run(&self, lots: Vec<Lot>, settings: &PlanSettings) -> PlanResult {
        self.execute(Uuid::new_v4().to_string(), lots, settings)
    }

    #[instrument(skip(self, lots, settings), fields(lots_count = lots.len()))]
    fn execute(&self, run_id: String, mut lots: Vec<Lot>, settings: &PlanSettings) -> PlanResult {
        info!(groups = settings.sync_groups.len(), "开始执行排产流程");

        // ==========================================
        // 步骤1: 输入校验 + 已排批次标注
        // ==========================================
        debug!("步骤1: 输入校验");

        for lot in lots.iter_mut() {
            if let Some(message) = lot.input_error() {
                debug!(lot_id = %lot.lot_id, row = lot.row_number, %message, "输入不合法");
                lot.mark_unfit(UnfitReason::InvalidInput { message });
                continue;
            }
            if lot.is_assigned() {
                if let (Some(reception), Some(intake)) = (lot.reception_date, lot.intake_date) {
                    if intake < reception {
                        warn!(lot_id = %lot.lot_id, %reception, %intake, "已有入盐日期早于收货日期");
                    }
                }
                lot.mark_preassigned();
            }
        }

        // ==========================================
        // 步骤2: 台账初始化
        // ==========================================
        let mut ctx = SchedulingContext::new(settings);
        let seeded = ctx.seed(&lots);
        info!(
            intake_lots = seeded.intake_lots,
            dispatch_lots = seeded.dispatch_lots,
            stabilization_lots = seeded.stabilization_lots,
            "台账初始化完成"
        );

        // ==========================================
        // 步骤3: 同步组统一入盐
        // ==========================================
        debug!("步骤3: 同步组统一入盐");
        let group_outcomes = self.resolver.resolve_all(&mut ctx, &mut lots);

        // ==========================================
        // 步骤4: 逐批次排产
        // ==========================================
        debug!("步骤4: 逐批次排产");
        self.scheduler.schedule_pending(&mut ctx, &mut lots);

        // ==========================================
        // 步骤5: 标注 + 报表
        // ==========================================
        OutputAnnotator::annotate(&mut lots);
        let stabilization_report = build_daily_report(&lots, settings);
        let load_summary = build_load_summary(&lots, settings);
        let summary = PlanSummary::from_lots(&lots);

        info!(
            total = summary.total,
            preassigned = summary.preassigned,
            group_placed = summary.group_placed,
            individually_placed = summary.individually_placed,
            tier2_placements = summary.tier2_placements,
            unfit = summary.unfit,
            invalid = summary.invalid,
            "排产流程完成"
        );

        PlanResult {
            run_id,
            lots,
            stabilization_report,
            load_summary,
            group_outcomes,
            summary,
        }
    }
}

impl Default for PlanOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
