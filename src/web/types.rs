//! Web 模块的数据类型定义

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::StoryRelay;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<StoryRelay>,
}

impl AppState {
    pub fn new(relay: StoryRelay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

/// 提取请求
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: Option<String>,
}

/// 提取响应
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub text: String,
    pub character_count: usize,
    pub url: String,
}

/// 翻译请求
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: Option<String>,
}

/// 翻译前后的字符数
#[derive(Debug, Serialize)]
pub struct CharacterCount {
    pub original: usize,
    pub translated: usize,
}

/// 翻译响应
#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub translation: String,
    pub character_count: CharacterCount,
    pub chunks: usize,
    pub failed_chunks: usize,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub keys: usize,
    pub chunk_size: usize,
}
