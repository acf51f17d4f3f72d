// ==========================================
// 批次腌制排产系统 - 引擎层
// ==========================================
// 职责: 日历、台账、同步组、逐批次排产、标注与报表
// 红线: 引擎不读写文件；不可排入必须带原因输出
// ==========================================

pub mod annotator;
pub mod calendar;
pub mod capacity_ledger;
pub mod context;
pub mod group_sync;
pub mod load_summary;
pub mod lot_scheduler;
pub mod orchestrator;
pub mod stabilization;

// 重导出核心引擎
pub use annotator::OutputAnnotator;
pub use calendar::BusinessCalendar;
pub use capacity_ledger::CapacityLedger;
pub use context::{LotRequest, SchedulingContext, SeedSummary};
pub use group_sync::{GroupOutcome, GroupResolution, GroupSyncResolver};
pub use load_summary::build_load_summary;
pub use lot_scheduler::{LotScheduler, Placement, ScheduleStats};
pub use orchestrator::{PlanOrchestrator, PlanResult, PlanSummary};
pub use stabilization::{build_daily_report, StabilizationTracker};
