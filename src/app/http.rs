// ==========================================
// 学生档案后端 - HTTP 路由与处理函数
// ==========================================
// 路由:
//   GET /students/:id?format={json|pdf}   学生档案
//   GET /health                           健康检查
// 失败: 一律 HTTP 500 + 统一消息，内部细节只写日志
// ==========================================

use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::{ApiError, ApiResult, StudentApi, FICHA_ERROR_MESSAGE};
use crate::app::state::AppState;
use crate::export::{ExportFormat, Representation};
use crate::repository::SqliteModel;

/// 构建路由
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/students/:id", get(get_student_ficha))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 学生档案
///
/// `format` 仅在精确等于 "pdf" 时导出 PDF，其余情况导出 JSON
///
/// 路径无法提取（如非法百分号编码）与非数字 id 一样走统一失败响应；
/// 查询串无法解析时按缺省格式处理
pub async fn get_student_ficha(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Representation> {
    let request_id = Uuid::new_v4();
    let format = match &query {
        Ok(Query(params)) => ExportFormat::from_query(params.get("format").map(String::as_str)),
        Err(_) => ExportFormat::default(),
    };
    let raw_id = match &path {
        Ok(Path(raw)) => raw.as_str(),
        Err(_) => "",
    };
    let span = tracing::info_span!("ficha", %request_id, id = %raw_id, %format);

    async move {
        let raw_id = path
            .map(|Path(raw)| raw)
            .map_err(|rejection| ApiError::InvalidId(rejection.body_text()))?;
        let id = StudentApi::<SqliteModel>::parse_id(&raw_id)?;
        state.student_api.get_ficha(id, format).await
    }
    .instrument(span)
    .await
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

impl IntoResponse for Representation {
    fn into_response(self) -> Response {
        match self {
            Representation::Json(value) => (StatusCode::OK, Json(value)).into_response(),
            Representation::Binary {
                content_type,
                file_name,
                bytes,
            } => (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("inline; filename=\"{}\"", file_name),
                    ),
                ],
                bytes,
            )
                .into_response(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // 不区分错误种类，对外不暴露细节
        tracing::error!(kind = self.kind(), error = %self, "学生档案生成失败");

        let body = Json(json!({ "error": FICHA_ERROR_MESSAGE }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
