// ==========================================
// 学生档案后端 - 导入层
// ==========================================
// 职责: 从 CSV 批量建立学生记录
// 约束: 只经由仓储写入，不直接访问数据库
// ==========================================

pub mod error;
pub mod student_importer;

// 重导出
pub use error::{ImportError, ImportResult};
pub use student_importer::{import_students, parse_students, ImportSummary, StudentCsvRow};
