// ==========================================
// 学生档案后端 - 应用层
// ==========================================
// 职责: HTTP 集成，连接外部请求与 API 层
// ==========================================

pub mod http;
pub mod state;

// 重导出
pub use http::build_router;
pub use state::AppState;
