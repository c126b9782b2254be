// ==========================================
// 学生档案后端 - API层错误类型
// ==========================================
// 职责: 汇总仓储层/导出层错误，保留结构化的错误种类
// 说明: 对外统一为一条不含细节的消息（见 app::http），种类仅用于日志与后续扩展
// ==========================================

use crate::export::ExportError;
use crate::repository::PersistenceError;
use thiserror::Error;

/// 对外统一的失败消息
pub const FICHA_ERROR_MESSAGE: &str = "Error al generar la ficha del alumno";

/// API层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// 记录不存在（仓储返回 None）
    #[error("学生不存在: id={id}")]
    NotFound { id: i64 },

    #[error("无效的学生ID: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl ApiError {
    /// 稳定的错误代码
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Persistence(_) => "PERSISTENCE_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::InvalidId(_) => "INVALID_ID",
            ApiError::Export(_) => "EXPORT_ERROR",
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
