// ==========================================
// 学生档案后端 - 导出层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// PDF 渲染引擎失败（引擎内部细节只保留文本）
    #[error("PDF 渲染失败: {0}")]
    Render(String),

    #[error("JSON 序列化失败: {0}")]
    Serialize(String),
}

impl From<lopdf::Error> for ExportError {
    fn from(err: lopdf::Error) -> Self {
        ExportError::Render(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Render(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
