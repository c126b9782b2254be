// ==========================================
// 学生档案后端 - 学生档案 API
// ==========================================
// 职责: 查询学生 → 按格式选择导出器 → 导出
// 顺序: 导出仅在查询完成后开始；无重试、无超时
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::Student;
use crate::export::{ExportFormat, Representation};
use crate::repository::{GenericRepository, ModelDelegate, SqliteModel};

// ==========================================
// StudentApi - 学生档案 API
// ==========================================
pub struct StudentApi<M = SqliteModel> {
    student_repo: GenericRepository<Student, M>,
}

impl<M: ModelDelegate> StudentApi<M> {
    /// 创建新的StudentApi实例
    pub fn new(student_repo: GenericRepository<Student, M>) -> Self {
        Self { student_repo }
    }

    /// 解析路径中的学生ID
    pub fn parse_id(raw: &str) -> ApiResult<i64> {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| ApiError::InvalidId(raw.to_string()))
    }

    /// 查询学生
    ///
    /// # 返回
    /// - Ok(Student): 学生（已预加载关联）
    /// - Err(ApiError::NotFound): 不存在
    /// - Err(ApiError::Persistence): 仓储失败
    pub async fn get_student(&self, id: i64) -> ApiResult<Student> {
        self.student_repo
            .fetch_by_id(id)
            .await?
            .ok_or(ApiError::NotFound { id })
    }

    /// 生成学生档案
    ///
    /// # 参数
    /// - id: 学生ID
    /// - format: 导出格式（导出器每次新建）
    pub async fn get_ficha(&self, id: i64, format: ExportFormat) -> ApiResult<Representation> {
        let student = self.get_student(id).await?;

        let exporter = format.exporter();
        let representation = exporter.export(&student).await?;

        tracing::info!(id, %format, "学生档案已生成");
        Ok(representation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewStudent;
    use crate::repository::student_repository;
    use chrono::NaiveDate;
    use rusqlite::Connection;
    use std::sync::{Arc, Mutex};

    async fn setup() -> (StudentApi, i64) {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        let repo = student_repository(Arc::new(Mutex::new(conn)), None);

        let created = repo
            .create(&NewStudent::new(
                "Araya",
                "Valentino",
                "45361303",
                "DNI",
                NaiveDate::from_ymd_opt(2004, 7, 14).unwrap(),
                "M",
                9938,
                NaiveDate::from_ymd_opt(2023, 3, 11).unwrap(),
            ))
            .await
            .unwrap();

        (StudentApi::new(repo), created.id)
    }

    #[tokio::test]
    async fn test_json_ficha() {
        let (api, id) = setup().await;

        let rep = api.get_ficha(id, ExportFormat::Json).await.unwrap();
        match rep {
            Representation::Json(value) => {
                assert_eq!(value["surname"], "Araya");
                assert_eq!(value["fileNumber"], 9938);
            }
            _ => panic!("Expected JSON"),
        }
    }

    #[tokio::test]
    async fn test_pdf_ficha() {
        let (api, id) = setup().await;

        let rep = api.get_ficha(id, ExportFormat::Pdf).await.unwrap();
        assert_eq!(rep.content_type(), "application/pdf");
    }

    #[tokio::test]
    async fn test_missing_student_is_not_found() {
        let (api, _) = setup().await;

        let err = api.get_ficha(999, ExportFormat::Pdf).await.unwrap_err();
        assert_eq!(err, ApiError::NotFound { id: 999 });
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(StudentApi::<SqliteModel>::parse_id("42").unwrap(), 42);
        assert!(matches!(
            StudentApi::<SqliteModel>::parse_id("abc"),
            Err(ApiError::InvalidId(_))
        ));
    }
}
