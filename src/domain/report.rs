// ==========================================
// 批次腌制排产系统 - 报表行模型
// ==========================================
// 供外部展示/导出使用，不含计算逻辑
// ==========================================

use crate::domain::types::Stage;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// StabilizationReportRow - 稳定库日占用
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilizationReportRow {
    pub date: NaiveDate,
    /// 当日总占用
    pub total_units: i64,
    /// 按产品类型拆分 (类型标签 -> 占用)
    pub units_by_product_type: BTreeMap<String, i64>,
    /// 当日有效容量（覆写优先）
    pub capacity: i64,
    /// 利用率 (%)，保留一位小数；容量为 0 时无意义
    pub utilization_pct: Option<f64>,
    /// 超出容量部分，最小为 0
    pub excess_units: i64,
}

// ==========================================
// DailyLoadRow - 入盐/出盐日负荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLoadRow {
    pub date: NaiveDate,
    pub stage: Stage,
    pub total_units: i64,
    pub lot_count: usize,
    pub capacity_tier1: i64,
    pub capacity_tier2: i64,
}
