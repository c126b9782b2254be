// ==========================================
// 学生档案后端 - 配置层
// ==========================================
// 职责: 进程级配置（数据库路径、监听地址、日志级别）
// ==========================================

pub mod app_config;

// 重导出
pub use app_config::{get_default_db_path, AppConfig, ConfigError};
