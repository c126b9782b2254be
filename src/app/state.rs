// ==========================================
// 学生档案后端 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享资源与API实例
// 说明: 持久化后端是唯一的共享资源；导出器按请求新建，不在此处持有
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::StudentApi;
use crate::db::open_shared_connection;
use crate::repository::{default_student_includes, student_repository};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    /// 学生档案API
    pub student_api: Arc<StudentApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在时自动建表）
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new(db_path: &str) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_shared_connection(db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;

        Ok(Self::from_connection(conn))
    }

    /// 从已有连接创建（连接需已建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        let student_repo = student_repository(conn, Some(default_student_includes()));

        Self {
            student_api: Arc::new(StudentApi::new(student_repo)),
        }
    }
}
