// ==========================================
// 批次腌制排产系统 - 入盐/出盐日负荷汇总
// ==========================================
// 口径: 最终批次日期（合法批次），每阶段每个有负荷的日期一行
// 产能列为当日有效两档产能（覆写优先）
// ==========================================

use crate::config::PlanSettings;
use crate::domain::lot::Lot;
use crate::domain::report::DailyLoadRow;
use crate::domain::types::{CapacityTier, Stage};
use crate::engine::capacity_ledger::CapacityLedger;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// 生成日负荷汇总：先入盐后出盐，各自按日期升序
pub fn build_load_summary(lots: &[Lot], settings: &PlanSettings) -> Vec<DailyLoadRow> {
    let mut rows = Vec::new();

    for stage in [Stage::Intake, Stage::Dispatch] {
        let ledger = CapacityLedger::new(
            stage,
            settings.global_capacity(stage),
            settings.overrides(stage).clone(),
        );

        let mut per_day: BTreeMap<NaiveDate, (i64, usize)> = BTreeMap::new();
        for lot in lots.iter().filter(|l| l.input_error().is_none()) {
            let date = match stage {
                Stage::Intake => lot.intake_date,
                Stage::Dispatch => lot.dispatch_date,
            };
            if let Some(date) = date {
                let entry = per_day.entry(date).or_insert((0, 0));
                entry.0 = entry.0.saturating_add(lot.quantity);
                entry.1 += 1;
            }
        }

        rows.extend(per_day.into_iter().map(|(date, (total_units, lot_count))| DailyLoadRow {
            date,
            stage,
            total_units,
            lot_count,
            capacity_tier1: ledger.effective_capacity(date, CapacityTier::First),
            capacity_tier2: ledger.effective_capacity(date, CapacityTier::Second),
        }));
    }

    rows
}
