//! 章节页面抓取

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use url::Url;

use crate::extraction::{ExtractError, ExtractResult};

/// 桌面版 Chrome 的 UA 字符串
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// 页面抓取能力
pub trait PageFetcher: Send + Sync {
    /// 获取页面 HTML
    fn fetch(&self, url: &Url) -> ExtractResult<String>;
}

/// 伪装浏览器身份的 HTTP 抓取器
///
/// 请求头按 Chrome 的顺序与取值发送，启用压缩解码与 cookie 存储，
/// 以免来源站点拦截裸客户端。
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> ExtractResult<Self> {
        let client = Client::builder()
            .user_agent(CHROME_USER_AGENT)
            .default_headers(browser_headers())
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> ExtractResult<String> {
        let response = self.client.get(url.as_str()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status {
                status: status.as_u16(),
            });
        }

        let html = response.text()?;
        tracing::debug!("已获取 {} 字节: {}", html.len(), url);
        Ok(html)
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let pairs: [(&str, &str); 11] = [
        (
            "sec-ch-ua",
            "\"Chromium\";v=\"124\", \"Google Chrome\";v=\"124\", \"Not-A.Brand\";v=\"99\"",
        ),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", "\"Windows\""),
        ("upgrade-insecure-requests", "1"),
        (
            "accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
        ),
        ("sec-fetch-site", "none"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-user", "?1"),
        ("sec-fetch-dest", "document"),
        ("accept-language", "en-US,en;q=0.9"),
        ("cache-control", "max-age=0"),
    ];

    for (name, value) in pairs {
        if let (Ok(name), Ok(value)) = (
            header::HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }

    headers
}
