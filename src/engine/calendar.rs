// ==========================================
// 批次腌制排产系统 - 工作日历
// ==========================================
// 工作日: 周一至周五，且不在节假日集合内
// 出盐日期调整: 周末规则 + 节假日规则（节假日周二~周四按出盐负荷择日）
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

// ==========================================
// BusinessCalendar - 工作日历
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BusinessCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl BusinessCalendar {
    pub fn new(holidays: BTreeSet<NaiveDate>) -> Self {
        Self { holidays }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// 是否工作日
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.is_holiday(date)
    }

    /// 严格之后的第一个工作日；超出日期表示范围时为 None
    pub fn next_business_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        let mut d = date.succ_opt()?;
        while !self.is_business_day(d) {
            d = d.succ_opt()?;
        }
        Some(d)
    }

    /// 严格之前的第一个工作日；超出日期表示范围时为 None
    pub fn previous_business_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        let mut d = date.pred_opt()?;
        while !self.is_business_day(d) {
            d = d.pred_opt()?;
        }
        Some(d)
    }

    /// 当日若为工作日则返回当日，否则顺延
    pub fn on_or_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        if self.is_business_day(date) {
            Some(date)
        } else {
            self.next_business_day(date)
        }
    }

    // ==========================================
    // 出盐日期调整
    // ==========================================

    /// 按周末/节假日规则调整出盐日期
    ///
    /// 规则：
    /// 1) 周末调整：周六 → 前一工作日；周日 → 后一工作日
    /// 2) 节假日调整（作用于第1步结果）：
    ///    - 周一 → 后一工作日
    ///    - 周二/周三/周四 → 比较前后工作日的已承诺出盐负荷，取较低者，相等取前者
    ///    - 周五 → 前一工作日
    ///
    /// # 参数
    /// - `dispatch_load`: 查询某日已承诺出盐量（负荷敏感，结果依赖处理顺序）
    ///
    /// 调整越过日期表示范围时返回 None
    pub fn adjust_dispatch<F>(
        &self,
        dispatch: NaiveDate,
        weekend_adjustment: bool,
        holiday_adjustment: bool,
        dispatch_load: F,
    ) -> Option<NaiveDate>
    where
        F: Fn(NaiveDate) -> i64,
    {
        let mut adjusted = dispatch;

        if weekend_adjustment {
            adjusted = match adjusted.weekday() {
                Weekday::Sat => self.previous_business_day(adjusted)?,
                Weekday::Sun => self.next_business_day(adjusted)?,
                _ => adjusted,
            };
        }

        if holiday_adjustment && self.is_holiday(adjusted) {
            adjusted = match adjusted.weekday() {
                Weekday::Mon => self.next_business_day(adjusted)?,
                Weekday::Tue | Weekday::Wed | Weekday::Thu => {
                    let previous = self.previous_business_day(adjusted)?;
                    let next = self.next_business_day(adjusted)?;
                    if dispatch_load(previous) <= dispatch_load(next) {
                        previous
                    } else {
                        next
                    }
                }
                Weekday::Fri => self.previous_business_day(adjusted)?,
                // 周末节假日仅在未开启周末调整时出现，保持不变
                Weekday::Sat | Weekday::Sun => adjusted,
            };
        }

        Some(adjusted)
    }
}
