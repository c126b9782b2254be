// ==========================================
// 学生档案后端 - HTTP 服务主入口
// ==========================================

use student_records::app::{build_router, AppState};
use student_records::config::AppConfig;
use student_records::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // 初始化日志系统
    if config.log_json {
        logging::init_json(&config.log_filter);
    } else {
        logging::init(&config.log_filter);
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", student_records::APP_NAME, student_records::VERSION);
    tracing::info!("==================================================");
    tracing::info!("使用数据库: {}", config.db_path);

    let app_state = AppState::new(&config.db_path).map_err(anyhow::Error::msg)?;
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("监听地址: {}", config.bind_addr);
    tracing::info!("  - GET /students/:id?format=json|pdf");
    tracing::info!("  - GET /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("服务已退出");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
}
