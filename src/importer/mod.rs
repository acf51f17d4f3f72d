// ==========================================
// 批次腌制排产系统 - 导入层
// ==========================================
// 职责: 外部批次文件 → 待排产批次
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod lot_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{parse_date, parse_integer, LotField, LotFieldMapper};
pub use file_parser::{CsvParser, ExcelParser, RawRow, RawTable, UniversalFileParser};
pub use lot_importer::LotImporter;
