// ==========================================
// 批次腌制排产系统 - 字段映射器
// ==========================================
// 职责: 源列名（含别名）→ 批次字段 + 类型转换
// 规则: 无法解析的日期/天数置空，数量无法解析按 0 处理
//       两者都会在排产时报告为输入非法，不在导入阶段拒绝
// ==========================================

use crate::domain::lot::Lot;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use chrono::{Duration, NaiveDate, NaiveDateTime};

// ==========================================
// 标准字段与别名
// ==========================================

/// 标准字段（第一个别名即标准列名）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotField {
    ReceptionDate,
    Quantity,
    ProductCode,
    TargetDwellDays,
    IntakeDate,
    DispatchDate,
    LotId,
}

impl LotField {
    /// 必需列
    pub const REQUIRED: [LotField; 4] = [
        LotField::ReceptionDate,
        LotField::Quantity,
        LotField::ProductCode,
        LotField::TargetDwellDays,
    ];

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            LotField::ReceptionDate => &["DIA", "RECEPTION_DATE"],
            LotField::Quantity => &["UNDS", "QUANTITY"],
            LotField::ProductCode => &["PRODUCTO", "PRODUCT"],
            LotField::TargetDwellDays => &["DIAS_SAL_OPTIMOS", "DIAS SAL OPTIMOS", "TARGET_DWELL"],
            LotField::IntakeDate => &["ENTRADA_SAL", "ENTRADA SAL", "INTAKE_DATE"],
            LotField::DispatchDate => &["SALIDA_SAL", "SALIDA SAL", "DISPATCH_DATE"],
            LotField::LotId => &["LOTE", "LOT_ID"],
        }
    }

    pub fn canonical(self) -> &'static str {
        self.aliases()[0]
    }
}

pub struct LotFieldMapper;

impl LotFieldMapper {
    /// 检查表头是否包含全部必需列（不区分大小写）
    pub fn check_headers(&self, headers: &[String]) -> ImportResult<()> {
        for field in LotField::REQUIRED {
            let present = headers.iter().any(|h| {
                field
                    .aliases()
                    .iter()
                    .any(|alias| h.trim().eq_ignore_ascii_case(alias))
            });
            if !present {
                return Err(ImportError::MissingColumn {
                    column: field.canonical().to_string(),
                    aliases: field.aliases().join(" / "),
                });
            }
        }
        Ok(())
    }

    /// 映射单行为批次
    pub fn map_to_lot(&self, row: &RawRow) -> Lot {
        let lot_id = self
            .get_string(row, LotField::LotId)
            .unwrap_or_else(|| format!("ROW-{}", row.row_number));

        Lot::new(
            lot_id,
            self.get_string(row, LotField::ReceptionDate)
                .and_then(|v| parse_date(&v)),
            self.get_string(row, LotField::Quantity)
                .and_then(|v| parse_integer(&v))
                .unwrap_or(0),
            self.get_string(row, LotField::ProductCode).unwrap_or_default(),
            self.get_string(row, LotField::TargetDwellDays)
                .and_then(|v| parse_integer(&v)),
        )
        .with_assignment(
            self.get_string(row, LotField::IntakeDate)
                .and_then(|v| parse_date(&v)),
            self.get_string(row, LotField::DispatchDate)
                .and_then(|v| parse_date(&v)),
        )
        .with_row_number(row.row_number)
    }

    /// 提取字符串字段，按别名顺序查找，空值视为缺失
    fn get_string(&self, row: &RawRow, field: LotField) -> Option<String> {
        for alias in field.aliases() {
            let value = row
                .values
                .iter()
                .find(|(header, _)| header.trim().eq_ignore_ascii_case(alias))
                .map(|(_, v)| v.trim());
            if let Some(v) = value {
                if !v.is_empty() {
                    return Some(v.to_string());
                }
            }
        }
        None
    }
}

// ==========================================
// 值解析
// ==========================================

/// Excel 日期序列号的起点（1900 日期系统，含闰年缺陷修正）
fn excel_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

/// 解析日期
///
/// 支持: YYYY-MM-DD / YYYY-MM-DD HH:MM:SS / DD/MM/YYYY / Excel 序列号
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%d/%m/%Y") {
        return Some(date);
    }

    let serial = value.parse::<f64>().ok()?;
    if !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    excel_epoch()?.checked_add_signed(Duration::days(serial.floor() as i64))
}

/// 解析整数；带小数的数值截断取整
pub fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(v) = value.parse::<i64>() {
        return Some(v);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
}
