//! 正文提取API

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use tokio::task;

use crate::web::handlers::{error_response, ApiError};
use crate::web::types::{AppState, ExtractRequest, ExtractResponse};

/// 抓取章节并返回正文
///
/// URL 缺失或不合法返回 400；抓取失败或页面无正文返回 500。
pub async fn extract_story(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|e| error_response(StatusCode::BAD_REQUEST, e.body_text()))?;

    let url = request
        .url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "URL is required"))?;

    tracing::info!("提取请求: {}", url);

    let relay = state.relay.clone();
    let target = url.clone();
    let result = task::spawn_blocking(move || relay.extract(&target))
        .await
        .map_err(|e| {
            tracing::error!("提取任务异常: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Extraction task failed")
        })?;

    match result {
        Ok(story) => {
            let text = story.text();
            let character_count = text.chars().count();
            tracing::info!("提取完成: {} 字符 (策略 '{}')", character_count, story.strategy);

            Ok(Json(ExtractResponse {
                success: true,
                text,
                character_count,
                url,
            }))
        }
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            tracing::error!("提取失败: {}", e);
            Err(error_response(status, e.to_string()))
        }
    }
}
