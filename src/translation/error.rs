//! 翻译模块统一错误处理
//!
//! 上游错误只在分块重试循环内部流转，决定轮换密钥、暂停还是直接消耗一次尝试，
//! 从不返回给 HTTP 调用方。

use thiserror::Error;

/// 上游补全接口错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// 429 速率限制
    #[error("rate limited by upstream (429)")]
    RateLimited,

    /// 503 服务过载
    #[error("upstream unavailable (503)")]
    Unavailable,

    /// 400，多数情况下是密钥额度耗尽
    #[error("upstream rejected request (400): {0}")]
    BadRequest(String),

    /// 网络错误（连接失败、超时、读取中断）
    #[error("network error: {0}")]
    Network(String),

    /// 其他非 200 状态
    #[error("upstream error {status}: {body}")]
    Status { status: u16, body: String },

    /// 200 但响应体无法解析
    #[error("invalid completion response: {0}")]
    Decode(String),
}

/// 重试循环对错误的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    /// 轮换密钥并暂停后重试
    RotateAndPause,
    /// 轮换密钥，立即重试
    Rotate,
    /// 不轮换，仅消耗一次尝试
    Consume,
}

impl UpstreamError {
    /// 根据 HTTP 状态码分类
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            429 => UpstreamError::RateLimited,
            503 => UpstreamError::Unavailable,
            400 => UpstreamError::BadRequest(body),
            _ => UpstreamError::Status { status, body },
        }
    }

    /// 重试循环应采取的动作
    pub fn retry_action(&self) -> RetryAction {
        match self {
            UpstreamError::RateLimited
            | UpstreamError::Unavailable
            | UpstreamError::BadRequest(_) => RetryAction::RotateAndPause,
            UpstreamError::Network(_) => RetryAction::Rotate,
            UpstreamError::Status { .. } | UpstreamError::Decode(_) => RetryAction::Consume,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(error: reqwest::Error) -> Self {
        UpstreamError::Network(error.to_string())
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(error: serde_json::Error) -> Self {
        UpstreamError::Decode(error.to_string())
    }
}

/// 密钥池错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyPoolError {
    #[error("no API keys configured (set GROQ_API_KEY_1)")]
    Empty,
}

/// 上游调用结果类型别名
pub type UpstreamResult<T> = Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(UpstreamError::from_status(429, String::new()), UpstreamError::RateLimited);
        assert_eq!(UpstreamError::from_status(503, String::new()), UpstreamError::Unavailable);
        assert!(matches!(
            UpstreamError::from_status(400, "quota".into()),
            UpstreamError::BadRequest(ref body) if body == "quota"
        ));
        assert!(matches!(
            UpstreamError::from_status(500, "boom".into()),
            UpstreamError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn test_retry_actions() {
        assert_eq!(UpstreamError::RateLimited.retry_action(), RetryAction::RotateAndPause);
        assert_eq!(UpstreamError::Unavailable.retry_action(), RetryAction::RotateAndPause);
        assert_eq!(
            UpstreamError::BadRequest(String::new()).retry_action(),
            RetryAction::RotateAndPause
        );
        assert_eq!(
            UpstreamError::Network("timeout".into()).retry_action(),
            RetryAction::Rotate
        );
        assert_eq!(
            UpstreamError::Status { status: 401, body: String::new() }.retry_action(),
            RetryAction::Consume
        );
        assert_eq!(
            UpstreamError::Decode("eof".into()).retry_action(),
            RetryAction::Consume
        );
    }
}
