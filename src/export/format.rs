// ==========================================
// 学生档案后端 - 导出格式与分派
// ==========================================
// 说明: 封闭的格式枚举 + 显式分派表；新增格式需新增枚举成员与导出器
// ==========================================

use crate::export::{Exporter, JsonExporter, PdfExporter};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Pdf,
}

impl ExportFormat {
    /// 解析查询参数
    ///
    /// 仅精确的 `"pdf"` 选择 PDF，其余（含缺省）一律 JSON
    pub fn from_query(format: Option<&str>) -> Self {
        match format {
            Some("pdf") => ExportFormat::Pdf,
            _ => ExportFormat::Json,
        }
    }

    /// 分派表：每次调用新建一个导出器
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            ExportFormat::Json => Box::new(JsonExporter),
            ExportFormat::Pdf => Box::new(PdfExporter::default()),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Pdf => write!(f, "pdf"),
        }
    }
}
