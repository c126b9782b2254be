// ==========================================
// 学生档案后端 - 导出层
// ==========================================
// 职责: 将一个已加载的学生实体转换为一种输出表示 (JSON / PDF)
// 约束: 导出器无状态，每次请求新建，不共享可变状态
// ==========================================

pub mod error;
pub mod format;
pub mod json_exporter;
pub mod pdf_exporter;

use crate::domain::Student;
use async_trait::async_trait;

pub use error::{ExportError, ExportResult};
pub use format::ExportFormat;
pub use json_exporter::JsonExporter;
pub use pdf_exporter::PdfExporter;

// ==========================================
// Representation - 导出结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum Representation {
    /// 可直接序列化的普通结构
    Json(serde_json::Value),
    /// 二进制缓冲（如 PDF 文档）
    Binary {
        content_type: &'static str,
        file_name: String,
        bytes: Vec<u8>,
    },
}

impl Representation {
    pub fn content_type(&self) -> &'static str {
        match self {
            Representation::Json(_) => "application/json",
            Representation::Binary { content_type, .. } => content_type,
        }
    }
}

// ==========================================
// Trait: Exporter
// ==========================================
// 实现者: JsonExporter / PdfExporter
#[async_trait]
pub trait Exporter: Send + Sync {
    /// 导出器对应的格式
    fn format(&self) -> ExportFormat;

    async fn export(&self, student: &Student) -> ExportResult<Representation>;
}
