// ==========================================
// 批次腌制排产系统 - 批次领域模型
// ==========================================
// 生命周期: 待排 (Unassigned) → 已排 (Fits) / 不可排 (Unfit)
// 已有入盐日期的批次视为权威输入，不再决策
// ==========================================

use crate::domain::types::{FitFlag, PlacementOrigin, UnfitReason};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Lot - 待排产批次（输入字段 + 派生输出字段）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    // ===== 标识 =====
    pub lot_id: String,    // 批次号 (LOTE)
    pub row_number: usize, // 源文件行号 (1-based)

    // ===== 输入 =====
    pub reception_date: Option<NaiveDate>, // 收货日期 (DIA)
    pub quantity: i64,                     // 数量 (UNDS)
    pub product_code: String,              // 产品代码 (PRODUCTO)
    pub target_dwell_days: Option<i64>,    // 目标腌制天数 (DIAS_SAL_OPTIMOS)

    // ===== 排产结果（可能是输入时已有） =====
    pub intake_date: Option<NaiveDate>,   // 入盐日期 (ENTRADA_SAL)
    pub dispatch_date: Option<NaiveDate>, // 出盐日期 (SALIDA_SAL)

    // ===== 派生字段 =====
    pub dwell_days: Option<i64>,           // 出盐 - 入盐
    pub pre_storage_days: Option<i64>,     // 入盐 - 收货
    pub dwell_deviation_days: Option<i64>, // 实际腌制天数 - 目标
    pub fit_flag: Option<FitFlag>,
    pub unfit_reason: Option<UnfitReason>,
    pub origin: Option<PlacementOrigin>,
}

impl Lot {
    /// 创建待排批次
    pub fn new(
        lot_id: impl Into<String>,
        reception_date: Option<NaiveDate>,
        quantity: i64,
        product_code: impl Into<String>,
        target_dwell_days: Option<i64>,
    ) -> Self {
        Self {
            lot_id: lot_id.into(),
            row_number: 0,
            reception_date,
            quantity,
            product_code: product_code.into(),
            target_dwell_days,
            intake_date: None,
            dispatch_date: None,
            dwell_days: None,
            pre_storage_days: None,
            dwell_deviation_days: None,
            fit_flag: None,
            unfit_reason: None,
            origin: None,
        }
    }

    /// 附带已有入盐/出盐日期
    pub fn with_assignment(
        mut self,
        intake_date: Option<NaiveDate>,
        dispatch_date: Option<NaiveDate>,
    ) -> Self {
        self.intake_date = intake_date;
        self.dispatch_date = dispatch_date;
        self
    }

    pub fn with_row_number(mut self, row_number: usize) -> Self {
        self.row_number = row_number;
        self
    }

    // ==========================================
    // 输入校验
    // ==========================================

    /// 输入缺陷描述；None 表示可参与排产与记账
    pub fn input_error(&self) -> Option<String> {
        let mut problems = Vec::new();
        if self.reception_date.is_none() {
            problems.push("reception date missing".to_string());
        }
        if self.quantity <= 0 {
            problems.push(format!("quantity must be positive (got {})", self.quantity));
        }
        match self.target_dwell_days {
            None => problems.push("target dwell days missing".to_string()),
            Some(days) if days < 0 => {
                problems.push(format!("target dwell days must be >= 0 (got {})", days))
            }
            Some(_) => {}
        }

        if problems.is_empty() {
            None
        } else {
            Some(problems.join("; "))
        }
    }

    /// 是否已有入盐日期（已排，权威）
    pub fn is_assigned(&self) -> bool {
        self.intake_date.is_some()
    }

    /// 是否仍待排产（合法、无入盐日期、尚未给出结论）
    pub fn is_pending(&self) -> bool {
        self.fit_flag.is_none() && self.intake_date.is_none()
    }

    /// 稳定库占用区间 [收货, 入盐-1]；同日入盐不占用
    pub fn stabilization_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let reception = self.reception_date?;
        let intake = self.intake_date?;
        if intake <= reception {
            return None;
        }
        Some((reception, intake.pred_opt()?))
    }

    // ==========================================
    // 状态迁移
    // ==========================================

    /// 写入排产结果并标记为已排
    pub fn place(&mut self, intake: NaiveDate, dispatch: NaiveDate, origin: PlacementOrigin) {
        self.intake_date = Some(intake);
        self.dispatch_date = Some(dispatch);
        self.dwell_days = Some((dispatch - intake).num_days());
        self.pre_storage_days = self.reception_date.map(|r| (intake - r).num_days());
        self.fit_flag = Some(FitFlag::Fits);
        self.unfit_reason = None;
        self.origin = Some(origin);
    }

    /// 输入已有入盐日期：按原日期标记为已排，不再决策
    ///
    /// 出盐日期缺失时保持缺失，派生字段仅计算可得部分
    pub fn mark_preassigned(&mut self) {
        self.pre_storage_days = match (self.reception_date, self.intake_date) {
            (Some(r), Some(i)) => Some((i - r).num_days()),
            _ => None,
        };
        self.dwell_days = match (self.intake_date, self.dispatch_date) {
            (Some(i), Some(d)) => Some((d - i).num_days()),
            _ => None,
        };
        self.fit_flag = Some(FitFlag::Fits);
        self.unfit_reason = None;
        self.origin = Some(PlacementOrigin::Preassigned);
    }

    /// 标记为不可排；日期保持未设置
    pub fn mark_unfit(&mut self, reason: UnfitReason) {
        self.fit_flag = Some(FitFlag::Unfit);
        self.unfit_reason = Some(reason);
        self.origin = None;
    }
}
