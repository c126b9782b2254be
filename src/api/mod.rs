// ==========================================
// 学生档案后端 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 HTTP 处理函数调用
// ==========================================

pub mod error;
pub mod student_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult, FICHA_ERROR_MESSAGE};
pub use student_api::StudentApi;
