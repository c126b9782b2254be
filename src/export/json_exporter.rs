// ==========================================
// 学生档案后端 - JSON 导出器
// ==========================================
// 恒等变换: 原样返回实体的普通结构
// ==========================================

use crate::domain::Student;
use crate::export::{ExportError, ExportFormat, ExportResult, Exporter, Representation};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

#[async_trait]
impl Exporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    async fn export(&self, student: &Student) -> ExportResult<Representation> {
        serde_json::to_value(student)
            .map(Representation::Json)
            .map_err(|e| ExportError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Faculty;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_json_export_is_identity() {
        let student = Student {
            id: 4,
            surname: "Araya".to_string(),
            given_name: "Valentino".to_string(),
            document_number: "45361303".to_string(),
            document_type: "DNI".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2004, 7, 14).unwrap(),
            sex: "M".to_string(),
            file_number: 9938,
            enrollment_date: NaiveDate::from_ymd_opt(2023, 3, 11).unwrap(),
            faculty_id: Some(2),
            faculty: Some(Faculty {
                id: 2,
                name: "Derecho".to_string(),
            }),
        };

        let Representation::Json(value) = JsonExporter.export(&student).await.unwrap() else {
            panic!("Expected JSON representation");
        };

        let back: Student = serde_json::from_value(value).unwrap();
        assert_eq!(back, student);
    }
}
