//! 翻译API

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use tokio::task;

use crate::web::handlers::{error_response, ApiError};
use crate::web::types::{AppState, CharacterCount, TranslateRequest, TranslateResponse};

/// 翻译文本
///
/// 单个分块失败只会在译文中留下占位文本，响应仍然是 200。
pub async fn translate_text(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|e| error_response(StatusCode::BAD_REQUEST, e.body_text()))?;

    let text = request
        .text
        .filter(|text| !text.is_empty())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Text is required"))?;

    let relay = state.relay.clone();
    let document = task::spawn_blocking(move || relay.translate(&text))
        .await
        .map_err(|e| {
            tracing::error!("翻译任务异常: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Translation task failed")
        })?;

    Ok(Json(TranslateResponse {
        success: true,
        translation: document.translation,
        character_count: CharacterCount {
            original: document.original_chars,
            translated: document.translated_chars,
        },
        chunks: document.chunk_count,
        failed_chunks: document.failed_chunks,
    }))
}
