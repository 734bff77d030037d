//! 无头 Chrome 抓取
//!
//! 浏览器实例只在一次 `fetch` 调用内存在，`Browser` 被 drop 时进程随之结束，
//! 所以任何返回路径都会关闭浏览器。

use std::ffi::OsStr;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions};
use url::Url;

use super::fetcher::{PageFetcher, CHROME_USER_AGENT};
use crate::extraction::{ExtractError, ExtractResult};

/// 滚动页面触发懒加载
const SCROLL_SCRIPT: &str = "window.scrollBy(0, document.body.scrollHeight); document.body.scrollHeight";

/// 隐藏自动化痕迹
const STEALTH_SCRIPT: &str = r#"
    Object.defineProperty(navigator, 'webdriver', { get: () => undefined, configurable: true });
    Object.defineProperty(navigator, 'languages', { get: () => ['en-US', 'en'] });
"#;

/// 无头浏览器抓取器
#[derive(Debug, Clone)]
pub struct BrowserFetcher {
    timeout: Duration,
    scroll_steps: usize,
    scroll_pause: Duration,
}

impl BrowserFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            scroll_steps: 8,
            scroll_pause: Duration::from_millis(600),
        }
    }

    fn launch(&self) -> ExtractResult<Browser> {
        let args = vec![
            OsStr::new("--disable-blink-features=AutomationControlled"),
            OsStr::new("--no-first-run"),
            OsStr::new("--no-default-browser-check"),
            OsStr::new("--disable-extensions"),
            OsStr::new("--mute-audio"),
            OsStr::new("--window-size=1366,900"),
            OsStr::new("--lang=en-US"),
        ];

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .idle_browser_timeout(self.timeout)
            .args(args)
            .build()
            .map_err(|e| browser_error("invalid launch options", e))?;

        Browser::new(options).map_err(|e| browser_error("failed to launch Chrome", e))
    }
}

impl PageFetcher for BrowserFetcher {
    fn fetch(&self, url: &Url) -> ExtractResult<String> {
        tracing::info!("使用无头浏览器抓取: {}", url);

        let browser = self.launch()?;
        let tab = browser
            .new_tab()
            .map_err(|e| browser_error("failed to open tab", e))?;
        tab.set_default_timeout(self.timeout);

        tab.set_user_agent(CHROME_USER_AGENT, Some("en-US,en;q=0.9"), None)
            .map_err(|e| browser_error("failed to set user agent", e))?;

        use headless_chrome::protocol::cdp::Page;
        if let Err(e) = tab.call_method(Page::AddScriptToEvaluateOnNewDocument {
            source: STEALTH_SCRIPT.to_string(),
            world_name: None,
            include_command_line_api: None,
            run_immediately: None,
        }) {
            tracing::warn!("无法注入隐藏脚本: {}", e);
        }

        tab.navigate_to(url.as_str())
            .map_err(|e| browser_error("navigation failed", e))?;
        tab.wait_until_navigated()
            .map_err(|e| browser_error("navigation timed out", e))?;

        for step in 0..self.scroll_steps {
            if let Err(e) = tab.evaluate(SCROLL_SCRIPT, false) {
                tracing::warn!("第 {} 次滚动失败: {}", step + 1, e);
                break;
            }
            std::thread::sleep(self.scroll_pause);
        }

        let html = tab
            .get_content()
            .map_err(|e| browser_error("failed to read page content", e))?;

        tracing::debug!("浏览器渲染完成，{} 字节", html.len());
        Ok(html)
    }
}

fn browser_error<E: std::fmt::Display>(context: &str, error: E) -> ExtractError {
    ExtractError::Browser(format!("{}: {}", context, error))
}
