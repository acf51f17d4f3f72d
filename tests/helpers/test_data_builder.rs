// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use lot_intake_aps::domain::Lot;

/// 日期简写
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ==========================================
// Lot 构建器
// ==========================================

pub struct LotBuilder {
    lot_id: String,
    reception_date: Option<NaiveDate>,
    quantity: i64,
    product_code: String,
    target_dwell_days: Option<i64>,
    intake_date: Option<NaiveDate>,
    dispatch_date: Option<NaiveDate>,
}

impl LotBuilder {
    /// 默认: 收货 2025-09-08（周一），数量 10，产品 P01，目标 7 天
    pub fn new(lot_id: &str) -> Self {
        Self {
            lot_id: lot_id.to_string(),
            reception_date: Some(d(2025, 9, 8)),
            quantity: 10,
            product_code: "P01".to_string(),
            target_dwell_days: Some(7),
            intake_date: None,
            dispatch_date: None,
        }
    }

    pub fn received(mut self, date: NaiveDate) -> Self {
        self.reception_date = Some(date);
        self
    }

    pub fn no_reception(mut self) -> Self {
        self.reception_date = None;
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn product(mut self, code: &str) -> Self {
        self.product_code = code.to_string();
        self
    }

    pub fn target(mut self, days: i64) -> Self {
        self.target_dwell_days = Some(days);
        self
    }

    pub fn no_target(mut self) -> Self {
        self.target_dwell_days = None;
        self
    }

    pub fn intake(mut self, date: NaiveDate) -> Self {
        self.intake_date = Some(date);
        self
    }

    pub fn dispatch(mut self, date: NaiveDate) -> Self {
        self.dispatch_date = Some(date);
        self
    }

    pub fn build(self) -> Lot {
        Lot::new(
            self.lot_id,
            self.reception_date,
            self.quantity,
            self.product_code,
            self.target_dwell_days,
        )
        .with_assignment(self.intake_date, self.dispatch_date)
    }
}
