// ==========================================
// 批次腌制排产系统 - 输出标注
// ==========================================
// 在全部排产完成后统一计算派生字段:
// 腌制天数 / 前置存放天数 / 腌制偏差
// ==========================================

use crate::domain::lot::Lot;
use tracing::debug;

pub struct OutputAnnotator;

impl OutputAnnotator {
    /// 为每个批次重算派生字段（本次排入与输入已有的一视同仁）
    ///
    /// 字段缺失的一侧保持 None；可排标记不在此修改
    pub fn annotate(lots: &mut [Lot]) {
        let mut with_deviation = 0usize;

        for lot in lots.iter_mut() {
            lot.pre_storage_days = match (lot.reception_date, lot.intake_date) {
                (Some(reception), Some(intake)) => Some((intake - reception).num_days()),
                _ => None,
            };
            lot.dwell_days = match (lot.intake_date, lot.dispatch_date) {
                (Some(intake), Some(dispatch)) => Some((dispatch - intake).num_days()),
                _ => None,
            };
            lot.dwell_deviation_days = match (lot.dwell_days, lot.target_dwell_days) {
                (Some(actual), Some(target)) => Some(actual.saturating_sub(target)),
                _ => None,
            };
            if lot.dwell_deviation_days.is_some() {
                with_deviation += 1;
            }
        }

        debug!(lots = lots.len(), with_deviation, "派生字段计算完成");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_deviation_from_adjusted_dispatch() {
        // 目标 5 天 → 09-13 周六 → 调整到 09-12，实际 4 天
        let mut lots = vec![
            Lot::new("A", Some(d(2025, 9, 6)), 10, "P01", Some(5))
                .with_assignment(Some(d(2025, 9, 8)), Some(d(2025, 9, 12))),
            Lot::new("B", Some(d(2025, 9, 6)), 10, "P01", Some(5)),
            Lot::new("C", Some(d(2025, 9, 6)), 10, "P01", None)
                .with_assignment(Some(d(2025, 9, 8)), Some(d(2025, 9, 12))),
        ];

        OutputAnnotator::annotate(&mut lots);

        assert_eq!(lots[0].dwell_days, Some(4));
        assert_eq!(lots[0].pre_storage_days, Some(2));
        assert_eq!(lots[0].dwell_deviation_days, Some(-1));
        assert_eq!(lots[1].dwell_days, None);
        assert_eq!(lots[1].dwell_deviation_days, None);
        assert_eq!(lots[2].dwell_days, Some(4));
        assert_eq!(lots[2].dwell_deviation_days, None);
    }

    #[test]
    fn test_deviation_saturates_for_extreme_target() {
        // 已有日期中出盐早于入盐，目标天数极大
        let mut lots = vec![Lot::new("A", Some(d(2025, 9, 6)), 10, "P01", Some(i64::MAX))
            .with_assignment(Some(d(2025, 9, 10)), Some(d(2025, 9, 8)))];

        OutputAnnotator::annotate(&mut lots);

        assert_eq!(lots[0].dwell_days, Some(-2));
        assert_eq!(lots[0].dwell_deviation_days, Some(i64::MIN));
    }
}
