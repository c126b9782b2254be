// ==========================================
// 学生档案后端 - 核心库
// ==========================================
// 技术栈: axum + Rust + SQLite
// 核心: 通用仓储 (CRUD) + 可插拔导出器 (JSON / PDF)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与载荷
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导出层 - 档案表示
pub mod export;

// 导入层 - CSV 批量建档
pub mod importer;

// 配置层 - 进程配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{Faculty, NewFaculty, NewStudent, Student, StudentPatch};

// 仓储
pub use repository::{
    GenericRepository, Include, ModelDelegate, PersistenceError, Record, SqliteModel,
    StudentRepository, ToPersistable,
};

// 导出
pub use export::{ExportError, ExportFormat, Exporter, JsonExporter, PdfExporter, Representation};

// API
pub use api::{ApiError, StudentApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "student-records";
