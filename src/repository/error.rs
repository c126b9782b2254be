// ==========================================
// 学生档案后端 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 后端原生错误类型不得越过仓储边界
// ==========================================

use std::fmt;
use thiserror::Error;

// ==========================================
// ModelError - 持久化后端错误
// ==========================================
// 仅在 ModelDelegate 实现与 GenericRepository 之间流转
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("数据库查询失败: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("数据库锁获取失败: {0}")]
    Lock(String),

    #[error("未知字段: {model}.{field}")]
    UnknownField { model: String, field: String },

    #[error("未知关联: {model}.{relation}")]
    UnknownRelation { model: String, relation: String },

    #[error("字段值不受支持 (field={field}): {message}")]
    UnsupportedValue { field: String, message: String },

    #[error("{0}")]
    Rejected(String),
}

/// 后端 Result 类型别名
pub type ModelResult<T> = Result<T, ModelError>;

// ==========================================
// Operation - 仓储操作名
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    FetchById,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::FetchById => write!(f, "fetch_by_id"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

// ==========================================
// PersistenceError - 仓储层错误
// ==========================================
// 始终携带操作名；按 id 操作时携带 id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{model} 持久化失败 (operation={operation}{}): {detail}", id_suffix(.id))]
pub struct PersistenceError {
    pub operation: Operation,
    pub model: String,
    pub id: Option<i64>,
    /// 后端失败的文本描述
    pub detail: String,
}

impl PersistenceError {
    pub fn new(
        operation: Operation,
        model: impl Into<String>,
        id: Option<i64>,
        detail: impl fmt::Display,
    ) -> Self {
        Self {
            operation,
            model: model.into(),
            id,
            detail: detail.to_string(),
        }
    }
}

fn id_suffix(id: &Option<i64>) -> String {
    match id {
        Some(id) => format!(", id={}", id),
        None => String::new(),
    }
}

/// Result 类型别名
pub type PersistenceResult<T> = Result<T, PersistenceError>;
