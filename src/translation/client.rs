//! Groq 补全接口客户端
//!
//! OpenAI 兼容的 chat completions 协议：一条系统消息加一条用户消息，
//! 200 响应取 `choices[0].message.content`。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{UpstreamError, UpstreamResult};
use super::prompts::{user_message, BURMESE_SYSTEM_PROMPT};

/// 默认接口地址
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// 默认模型
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// 补全后端
///
/// 一次调用对应一次 HTTP 尝试，重试与密钥轮换由调用方负责。
pub trait CompletionBackend: Send + Sync {
    fn complete(&self, api_key: &str, chunk: &str) -> UpstreamResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatContent,
}

#[derive(Debug, Deserialize)]
struct ChatContent {
    content: String,
}

/// 后端配置
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.4,
            timeout: Duration::from_secs(90),
        }
    }
}

/// 基于 reqwest 阻塞客户端的 Groq 后端
#[derive(Debug, Clone)]
pub struct GroqBackend {
    client: reqwest::blocking::Client,
    config: GroqConfig,
}

impl GroqBackend {
    pub fn new(config: GroqConfig) -> UpstreamResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GroqConfig {
        &self.config
    }

    fn request_body<'a>(&'a self, chunk: &str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: BURMESE_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message(chunk),
                },
            ],
            temperature: self.config.temperature,
        }
    }
}

impl CompletionBackend for GroqBackend {
    fn complete(&self, api_key: &str, chunk: &str) -> UpstreamResult<String> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&self.request_body(chunk))
            .send()?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            // 读取失败时保留状态码分类
            let body = response.text().unwrap_or_default();
            return Err(UpstreamError::from_status(status.as_u16(), body));
        }

        parse_completion(&response.text()?)
    }
}

/// 解析 200 响应体
pub fn parse_completion(body: &str) -> UpstreamResult<String> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| UpstreamError::Decode("response has no choices".to_string()))
}
