//! 正文提取错误类型

use thiserror::Error;

/// 提取错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// URL 无法解析或协议不受支持
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// 域名校验未通过
    #[error("Only {expected} URLs are supported (got {host})")]
    HostNotAllowed { host: String, expected: String },

    /// 来源站点返回非 2xx 状态
    #[error("Wattpad Access Denied: {status}")]
    Status { status: u16 },

    /// 抓取时的网络错误（连接、超时、读取正文）
    #[error("Network error while fetching page: {0}")]
    Network(String),

    /// 无头浏览器错误
    #[error("Browser error: {0}")]
    Browser(String),

    /// 所有提取策略都没有命中
    #[error("No story content found on the page")]
    NoContent,
}

impl ExtractError {
    /// 是否属于请求本身的问题（对应 HTTP 400）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExtractError::InvalidUrl(_) | ExtractError::HostNotAllowed { .. }
        )
    }

    /// 是否属于抓取阶段的失败
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ExtractError::Status { .. } | ExtractError::Network(_) | ExtractError::Browser(_)
        )
    }
}

impl From<reqwest::Error> for ExtractError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => ExtractError::Status {
                status: status.as_u16(),
            },
            None => ExtractError::Network(error.to_string()),
        }
    }
}

/// 提取结果类型别名
pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(ExtractError::InvalidUrl("x".into()).is_client_error());
        assert!(ExtractError::HostNotAllowed {
            host: "example.com".into(),
            expected: "wattpad.com".into(),
        }
        .is_client_error());
        assert!(ExtractError::Status { status: 403 }.is_fetch_error());
        assert!(!ExtractError::NoContent.is_fetch_error());
        assert!(!ExtractError::NoContent.is_client_error());
    }

    #[test]
    fn test_status_message() {
        assert_eq!(
            ExtractError::Status { status: 403 }.to_string(),
            "Wattpad Access Denied: 403"
        );
    }
}
