// ==========================================
// 学生档案后端 - 学生 CSV 导入
// ==========================================
// 表头: surname,givenName,documentNumber,documentType,birthDate,sex,fileNumber,enrollmentDate[,facultyId]
// 日期格式: YYYY-MM-DD
// 写入: 逐行经 GenericRepository::create；单行失败不影响其他行
// ==========================================

use crate::domain::{NewStudent, Student};
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::{GenericRepository, ModelDelegate};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;

/// CSV 行（原始字符串）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCsvRow {
    pub surname: String,
    pub given_name: String,
    pub document_number: String,
    pub document_type: String,
    pub birth_date: String,
    pub sex: String,
    pub file_number: String,
    pub enrollment_date: String,
    #[serde(default)]
    pub faculty_id: Option<String>,
}

impl StudentCsvRow {
    /// 转换为领域对象（行号从 1 开始，不含表头）
    pub fn into_new_student(self, row: usize) -> ImportResult<NewStudent> {
        let birth_date = parse_date(row, "birthDate", &self.birth_date)?;
        let enrollment_date = parse_date(row, "enrollmentDate", &self.enrollment_date)?;
        let file_number = parse_int(row, "fileNumber", &self.file_number)?;

        let student = NewStudent::new(
            self.surname.trim(),
            self.given_name.trim(),
            self.document_number.trim(),
            self.document_type.trim(),
            birth_date,
            self.sex.trim(),
            file_number,
            enrollment_date,
        );

        match self.faculty_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Ok(student.with_faculty(parse_int(row, "facultyId", raw)?)),
            _ => Ok(student),
        }
    }
}

/// 导入汇总
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub imported: Vec<Student>,
    pub failures: Vec<ImportError>,
}

impl ImportSummary {
    pub fn total_rows(&self) -> usize {
        self.imported.len() + self.failures.len()
    }
}

/// 解析 CSV 为领域对象（逐行结果）
pub fn parse_students<R: Read>(reader: R) -> ImportResult<Vec<ImportResult<NewStudent>>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in csv_reader.deserialize::<StudentCsvRow>().enumerate() {
        let row = idx + 1;
        rows.push(
            result
                .map_err(ImportError::from)
                .and_then(|r| r.into_new_student(row)),
        );
    }

    Ok(rows)
}

/// 解析并写入
pub async fn import_students<R, M>(
    repo: &GenericRepository<Student, M>,
    reader: R,
) -> ImportResult<ImportSummary>
where
    R: Read,
    M: ModelDelegate,
{
    let mut summary = ImportSummary::default();

    for (idx, parsed) in parse_students(reader)?.into_iter().enumerate() {
        let row = idx + 1;
        let new_student = match parsed {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(row, error = %e, "跳过无法解析的行");
                summary.failures.push(e);
                continue;
            }
        };

        match repo.create(&new_student).await {
            Ok(student) => {
                tracing::debug!(row, id = student.id, file_number = student.file_number, "学生已导入");
                summary.imported.push(student);
            }
            Err(source) => {
                tracing::warn!(row, error = %source, "学生写入失败");
                summary.failures.push(ImportError::Persistence { row, source });
            }
        }
    }

    tracing::info!(
        imported = summary.imported.len(),
        failed = summary.failures.len(),
        "CSV 导入完成"
    );
    Ok(summary)
}

fn parse_date(row: usize, field: &str, raw: &str) -> ImportResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| ImportError::FieldValueError {
        row,
        field: field.to_string(),
        message: format!("日期格式错误（应为YYYY-MM-DD）: {}", e),
    })
}

fn parse_int(row: usize, field: &str, raw: &str) -> ImportResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| ImportError::FieldValueError {
            row,
            field: field.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::student_repository;
    use rusqlite::Connection;
    use std::sync::{Arc, Mutex};

    const CSV: &str = "\
surname,givenName,documentNumber,documentType,birthDate,sex,fileNumber,enrollmentDate
Araya,Valentino,45361303,DNI,2004-07-14,M,9938,2023-03-11
Pérez,Lucía,40111222,DNI,14/07/2004,F,9939,2023-03-11
Gómez,Juan,38999000,PAS,2001-01-30,M,9940,2022-08-01
";

    #[test]
    fn test_parse_reports_bad_rows() {
        let rows = parse_students(CSV.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_ok());
        match &rows[1] {
            Err(ImportError::FieldValueError { row, field, .. }) => {
                assert_eq!(*row, 2);
                assert_eq!(field, "birthDate");
            }
            other => panic!("Expected FieldValueError, got {:?}", other),
        }
        assert_eq!(rows[2].as_ref().unwrap().document_type(), "PAS");
    }

    #[tokio::test]
    async fn test_import_creates_valid_rows() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        let repo = student_repository(Arc::new(Mutex::new(conn)), None);

        let summary = import_students(&repo, CSV.as_bytes()).await.unwrap();

        assert_eq!(summary.total_rows(), 3);
        assert_eq!(summary.imported.len(), 2);
        assert_eq!(summary.failures.len(), 1);

        let first = &summary.imported[0];
        let fetched = repo.fetch_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(fetched.surname, "Araya");
    }
}
