// ==========================================
// 学生档案后端 - 导入层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("第{row}行 字段错误 (field={field}): {message}")]
    FieldValueError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("第{row}行 写入失败: {source}")]
    Persistence {
        row: usize,
        #[source]
        source: PersistenceError,
    },
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
