//! Web 路由处理器

pub mod api;

pub use api::*;

use axum::{http::StatusCode, response::Json};
use serde_json::json;

/// 处理器统一的错误返回类型
pub type ApiError = (StatusCode, Json<serde_json::Value>);

/// 构造 `{"error": ...}` 错误响应
pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}
