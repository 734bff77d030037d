//! # 网络模块
//!
//! 章节页面的抓取实现：
//!
//! - `fetcher` - 伪装成 Chrome 的阻塞 HTTP 客户端
//! - `browser` - 无头 Chrome 抓取（`headless` feature）

#[cfg(feature = "headless")]
pub mod browser;
pub mod fetcher;

#[cfg(feature = "headless")]
pub use browser::BrowserFetcher;
pub use fetcher::{HttpFetcher, PageFetcher, CHROME_USER_AGENT};
