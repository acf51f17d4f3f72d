// ==========================================
// 批次腌制排产系统 - 批次数据导入器
// ==========================================
// 职责: 读取批次文件，生成待排产批次列表
// 输入: Excel (.xlsx) / CSV (.csv)
// 输出: Vec<Lot>，保持文件行顺序
// ==========================================

use crate::domain::lot::Lot;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::LotFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use std::path::Path;
use tracing::{info, instrument, warn};

// ==========================================
// LotImporter - 批次数据导入器
// ==========================================
pub struct LotImporter {
    parser: UniversalFileParser,
    mapper: LotFieldMapper,
}

impl LotImporter {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
            mapper: LotFieldMapper,
        }
    }

    /// 从文件导入批次
    ///
    /// 流程:
    /// 1) 按扩展名解析原始表
    /// 2) 校验必需列
    /// 3) 逐行映射（单元格无法解析时置空，不拒绝整行）
    ///
    /// # 返回
    /// - Ok(Vec<Lot>): 文件行顺序
    /// - Err(ImportError): 文件不存在 / 格式不支持 / 解析失败 / 缺少必需列
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn import_from_file<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<Lot>> {
        let table = self.parser.parse(path.as_ref())?;
        self.mapper.check_headers(&table.headers)?;

        let lots: Vec<Lot> = table
            .rows
            .iter()
            .map(|row| self.mapper.map_to_lot(row))
            .collect();

        let incomplete = lots.iter().filter(|l| l.input_error().is_some()).count();
        if incomplete > 0 {
            warn!(incomplete, "部分批次字段缺失或无法解析，将报告为输入非法");
        }
        info!(lots = lots.len(), "批次导入完成");

        Ok(lots)
    }
}

impl Default for LotImporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;
    use chrono::NaiveDate;
    use std::io::Write;

    #[test]
    fn test_import_csv_keeps_order_and_assignments() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "LOTE,DIA,UNDS,PRODUCTO,DIAS_SAL_OPTIMOS,ENTRADA_SAL,SALIDA_SAL").unwrap();
        writeln!(file, "L-1,2025-09-08,100,P01,7,2025-09-08,2025-09-15").unwrap();
        writeln!(file, ",08/09/2025,50,J01,5,,").unwrap();

        let lots = LotImporter::new().import_from_file(file.path()).unwrap();

        assert_eq!(lots.len(), 2);
        assert_eq!(lots[0].lot_id, "L-1");
        assert_eq!(lots[0].dispatch_date, NaiveDate::from_ymd_opt(2025, 9, 15));
        assert_eq!(lots[1].lot_id, "ROW-2");
        assert_eq!(lots[1].reception_date, NaiveDate::from_ymd_opt(2025, 9, 8));
        assert!(lots[1].intake_date.is_none());
    }

    #[test]
    fn test_import_missing_required_column() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "DIA,UNDS,DIAS_SAL_OPTIMOS").unwrap();
        writeln!(file, "2025-09-08,100,7").unwrap();

        let err = LotImporter::new().import_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn { ref column, .. } if column == "PRODUCTO"));
    }
}
