// ==========================================
// 批次腌制排产系统 - 导出层
// ==========================================
// 职责: 排产结果与报表 → CSV
// ==========================================

pub mod csv_writer;
pub mod error;

pub use csv_writer::{write_load_summary_csv, write_plan_csv, write_stabilization_csv};
pub use error::{ExportError, ExportResult};
