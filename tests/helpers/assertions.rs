// ==========================================
// 排产结果通用断言 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use lot_intake_aps::config::PlanSettings;
use lot_intake_aps::domain::{CapacityTier, FitFlag, PlacementOrigin, Stage};
use lot_intake_aps::engine::{BusinessCalendar, CapacityLedger, PlanResult};
use std::collections::BTreeMap;

/// 校验本次排入批次的日期约束
///
/// - 入盐/出盐为工作日（周末与节假日调整均开启时）
/// - 入盐 >= 收货，且在存放窗口内
pub fn assert_placements_valid(result: &PlanResult, settings: &PlanSettings) {
    let calendar = BusinessCalendar::new(settings.holidays.clone());

    for lot in &result.lots {
        if lot.fit_flag != Some(FitFlag::Fits) || lot.origin == Some(PlacementOrigin::Preassigned) {
            continue;
        }
        let reception = lot.reception_date.unwrap();
        let intake = lot.intake_date.unwrap();
        let dispatch = lot.dispatch_date.unwrap();

        assert!(calendar.is_business_day(intake), "{} 入盐日非工作日: {}", lot.lot_id, intake);
        if settings.weekend_adjustment && settings.holiday_adjustment {
            assert!(calendar.is_business_day(dispatch), "{} 出盐日非工作日: {}", lot.lot_id, dispatch);
        }
        assert!(intake >= reception, "{} 入盐早于收货", lot.lot_id);
        assert!(
            (intake - reception).num_days() <= settings.max_storage_days_for(&lot.product_code),
            "{} 超出存放窗口",
            lot.lot_id
        );
    }
}

/// 校验每日入盐/出盐合计不超过第2档有效产能，稳定库无超出
pub fn assert_capacity_respected(result: &PlanResult, settings: &PlanSettings) {
    for stage in [Stage::Intake, Stage::Dispatch] {
        let ledger = CapacityLedger::new(
            stage,
            settings.global_capacity(stage),
            settings.overrides(stage).clone(),
        );
        let mut totals: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for lot in result.lots.iter().filter(|l| l.input_error().is_none()) {
            let date = match stage {
                Stage::Intake => lot.intake_date,
                Stage::Dispatch => lot.dispatch_date,
            };
            if let Some(date) = date {
                *totals.entry(date).or_insert(0) += lot.quantity;
            }
        }
        for (date, total) in totals {
            let cap = ledger.effective_capacity(date, CapacityTier::Second);
            assert!(total <= cap, "{} {} 负荷 {} 超出产能 {}", stage, date, total, cap);
        }
    }

    for row in &result.stabilization_report {
        assert_eq!(row.excess_units, 0, "稳定库 {} 超出容量", row.date);
    }
}
