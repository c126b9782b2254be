// ==========================================
// 学生档案后端 - 学生/学院仓储装配
// ==========================================
// 职责: 声明 students / faculties 表结构，并装配对应的 GenericRepository
// ==========================================

use crate::domain::{Faculty, Student};
use crate::repository::generic_repo::GenericRepository;
use crate::repository::include::Include;
use crate::repository::sqlite_model::{ColumnSpec, RelationSpec, SqliteModel, TableSpec};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// 学生 → 学院 关联名
pub const FACULTY_RELATION: &str = "faculty";

pub type StudentRepository = GenericRepository<Student, SqliteModel>;
pub type FacultyRepository = GenericRepository<Faculty, SqliteModel>;

/// faculties 表结构
pub fn faculty_table() -> TableSpec {
    TableSpec::new("faculties", vec![ColumnSpec::new("name", "name")])
}

/// students 表结构（含 faculty 关联）
pub fn student_table() -> TableSpec {
    TableSpec::new(
        "students",
        vec![
            ColumnSpec::new("surname", "surname"),
            ColumnSpec::new("givenName", "given_name"),
            ColumnSpec::new("documentNumber", "document_number"),
            ColumnSpec::new("documentType", "document_type"),
            ColumnSpec::new("birthDate", "birth_date"),
            ColumnSpec::new("sex", "sex"),
            ColumnSpec::new("fileNumber", "file_number"),
            ColumnSpec::new("enrollmentDate", "enrollment_date"),
            ColumnSpec::new("facultyId", "faculty_id"),
        ],
    )
    .with_relation(RelationSpec {
        name: FACULTY_RELATION,
        foreign_key: "facultyId",
        target: faculty_table(),
    })
}

/// 学生档案默认预加载学院
pub fn default_student_includes() -> Include {
    Include::new().relation(FACULTY_RELATION)
}

/// 从已有连接装配学生仓储
pub fn student_repository(
    conn: Arc<Mutex<Connection>>,
    includes: Option<Include>,
) -> StudentRepository {
    GenericRepository::new(Arc::new(SqliteModel::new(conn, student_table())), includes)
}

/// 从已有连接装配学院仓储
pub fn faculty_repository(conn: Arc<Mutex<Connection>>) -> FacultyRepository {
    GenericRepository::new(Arc::new(SqliteModel::new(conn, faculty_table())), None)
}
