// ==========================================
// 学生档案后端 - CSV 学生导入工具
// ==========================================
// 用法: import_students <csv路径>
// 数据库路径取自 STUDENT_RECORDS_DB_PATH（缺省为用户数据目录）
// ==========================================

use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context};
use student_records::config::AppConfig;
use student_records::db::open_shared_connection;
use student_records::importer::import_students;
use student_records::logging;
use student_records::repository::student_repository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    logging::init(&config.log_filter);

    let Some(csv_path) = std::env::args().nth(1).map(PathBuf::from) else {
        bail!("用法: import_students <csv路径>");
    };
    if !csv_path.exists() {
        bail!("文件不存在: {}", csv_path.display());
    }

    let conn = open_shared_connection(&config.db_path)
        .with_context(|| format!("无法打开数据库: {}", config.db_path))?;
    let repo = student_repository(conn, None);

    let file = File::open(&csv_path)
        .with_context(|| format!("无法读取文件: {}", csv_path.display()))?;
    let summary = import_students(&repo, file).await?;

    println!("导入完成: 成功 {} 行, 失败 {} 行", summary.imported.len(), summary.failures.len());
    for failure in &summary.failures {
        println!("  - {}", failure);
    }

    Ok(())
}
