// ==========================================
// 批次腌制排产系统 - 批次文件导入错误
// ==========================================
// 说明: 单元格值无法解析不是错误（字段置空，排产时报告为输入非法）
//       只有文件级/表头级问题才会中断导入
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("批次文件不存在: {0}")]
    FileNotFound(String),

    #[error("不支持的批次文件类型: {0}（可用: .csv / .xlsx）")]
    UnsupportedFormat(String),

    #[error("读取批次文件失败: {0}")]
    FileReadError(String),

    #[error("工作簿解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 内容解析失败: {0}")]
    CsvParseError(String),

    /// 表头缺少排产必需的列
    #[error("表头缺少列 {column}（可识别的写法: {aliases}）")]
    MissingColumn { column: String, aliases: String },
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::CsvParseError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        Self::ExcelParseError(err.to_string())
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
