// ==========================================
// 批次腌制排产系统 - CSV 导出
// ==========================================
// 输出: 排产结果 / 稳定库日占用 / 入盐出盐日负荷
// 日期格式统一 YYYY-MM-DD，缺失值输出空串
// ==========================================

use crate::domain::lot::Lot;
use crate::domain::report::{DailyLoadRow, StabilizationReportRow};
use crate::domain::types::FitFlag;
use crate::export::error::ExportResult;
use chrono::NaiveDate;
use csv::Writer;
use std::collections::BTreeSet;
use std::io::Write;

const PLAN_HEADER: [&str; 13] = [
    "LOTE",
    "DIA",
    "UNDS",
    "PRODUCTO",
    "DIAS_SAL_OPTIMOS",
    "ENTRADA_SAL",
    "SALIDA_SAL",
    "DIAS_SAL",
    "DIAS_ALMACENADOS",
    "DIFERENCIA_DIAS_SAL",
    "LOTE_NO_ENCAJA",
    "ORIGEN",
    "MOTIVO",
];

const LOAD_HEADER: [&str; 6] = ["FECHA", "ETAPA", "UNDS", "LOTES", "CAP_T1", "CAP_T2"];

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn int_cell(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// 导出排产结果（输入顺序）
pub fn write_plan_csv<W: Write>(out: W, lots: &[Lot]) -> ExportResult<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(PLAN_HEADER)?;

    for lot in lots {
        let no_fit = match lot.fit_flag {
            Some(FitFlag::Unfit) => "Sí",
            Some(FitFlag::Fits) => "No",
            None => "",
        };
        wtr.write_record([
            lot.lot_id.clone(),
            date_cell(lot.reception_date),
            lot.quantity.to_string(),
            lot.product_code.clone(),
            int_cell(lot.target_dwell_days),
            date_cell(lot.intake_date),
            date_cell(lot.dispatch_date),
            int_cell(lot.dwell_days),
            int_cell(lot.pre_storage_days),
            int_cell(lot.dwell_deviation_days),
            no_fit.to_string(),
            lot.origin.as_ref().map(|o| o.to_string()).unwrap_or_default(),
            lot.unfit_reason.as_ref().map(|r| r.to_string()).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// 导出稳定库日占用；产品类型列取所有行出现过的类型（升序）
pub fn write_stabilization_csv<W: Write>(out: W, rows: &[StabilizationReportRow]) -> ExportResult<()> {
    let type_labels: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.units_by_product_type.keys().map(String::as_str))
        .collect();

    let mut wtr = Writer::from_writer(out);
    let mut header = vec!["FECHA".to_string(), "TOTAL".to_string()];
    header.extend(type_labels.iter().map(|l| l.to_string()));
    header.extend(["CAPACIDAD", "UTILIZACION_PCT", "EXCESO"].map(String::from));
    wtr.write_record(&header)?;

    for row in rows {
        let mut record = vec![date_cell(Some(row.date)), row.total_units.to_string()];
        record.extend(type_labels.iter().map(|label| {
            row.units_by_product_type
                .get(*label)
                .copied()
                .unwrap_or(0)
                .to_string()
        }));
        record.push(row.capacity.to_string());
        record.push(
            row.utilization_pct
                .map(|p| format!("{:.1}", p))
                .unwrap_or_default(),
        );
        record.push(row.excess_units.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// 导出入盐/出盐日负荷
pub fn write_load_summary_csv<W: Write>(out: W, rows: &[DailyLoadRow]) -> ExportResult<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(LOAD_HEADER)?;

    for row in rows {
        wtr.write_record([
            date_cell(Some(row.date)),
            row.stage.to_string(),
            row.total_units.to_string(),
            row.lot_count.to_string(),
            row.capacity_tier1.to_string(),
            row.capacity_tier2.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
