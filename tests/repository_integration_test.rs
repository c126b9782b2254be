// ==========================================
// 仓储层集成测试（文件数据库）
// ==========================================
// 测试目标: 通用仓储在真实文件库上的 CRUD、关联加载与 CSV 导入
// ==========================================


use student_records::db::open_shared_connection;
use student_records::importer::import_students;
use student_records::repository::{
    default_student_includes, faculty_repository, student_repository,
};
use student_records::{NewFaculty, StudentPatch};

#[tokio::test]
async fn test_records_survive_reopen() {
    let (temp_file, conn) = test_helpers::create_test_db().unwrap();
    let repo = student_repository(conn.clone(), None);

    let created = repo.create(&test_helpers::araya(9938)).await.unwrap();
    drop(repo);
    drop(conn);

    let db_path = temp_file.path().to_str().unwrap();
    let reopened = open_shared_connection(db_path).unwrap();
    let fetched = student_repository(reopened, None)
        .fetch_by_id(created.id)
        .await
        .unwrap()
        .expect("student should persist");

    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_full_lifecycle_with_faculty() {
    let (_temp_file, conn) = test_helpers::create_test_db().unwrap();
    let faculties = faculty_repository(conn.clone());
    let students = student_repository(conn.clone(), Some(default_student_includes()));

    let ingenieria = faculties.create(&NewFaculty::new("Ingeniería")).await.unwrap();
    let medicina = faculties.create(&NewFaculty::new("Medicina")).await.unwrap();

    let created = students
        .create(&test_helpers::araya(1001).with_faculty(ingenieria.id))
        .await
        .unwrap();
    assert_eq!(created.faculty_name(), "Ingeniería");

    let patch = StudentPatch {
        faculty_id: Some(medicina.id),
        ..Default::default()
    };
    let updated = students
        .update(created.id, &patch)
        .await
        .unwrap()
        .expect("student should exist");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.faculty_name(), "Medicina");

    let deleted = students.delete(created.id).await.unwrap().expect("student should exist");
    assert_eq!(deleted.faculty_name(), "Medicina");
    assert!(students.fetch_by_id(created.id).await.unwrap().is_none());
    assert!(students.delete(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_csv_import_reports_bad_rows() {
    let (_temp_file, conn) = test_helpers::create_test_db().unwrap();
    let repo = student_repository(conn, None);

    let csv = "\
surname,givenName,documentNumber,documentType,birthDate,sex,fileNumber,enrollmentDate
Araya,Valentino,45361303,DNI,2004-07-14,M,9938,2023-03-11
Paz,Lucía,40111222,DNI,2003-01-02,F,abc,2022-03-01
Gómez,Julián,39888777,DNI,2002-09-30,M,9938,2021-03-15
";

    let summary = import_students(&repo, csv.as_bytes()).await.unwrap();

    assert_eq!(summary.total_rows(), 3);
    assert_eq!(summary.imported.len(), 1);
    assert_eq!(summary.imported[0].surname, "Araya");
    // 第 2 行字段非法，第 3 行学号重复
    assert_eq!(summary.failures.len(), 2);
}
