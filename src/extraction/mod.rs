//! # 正文提取模块
//!
//! 抓取章节页面并按顺序尝试一组提取策略，第一个非空结果即为正文。
//!
//! - `strategies` - 各个提取策略及默认顺序
//! - `error` - 提取错误类型

pub mod error;
pub mod strategies;

pub use error::{ExtractError, ExtractResult};
pub use strategies::{default_cascade, Strategy, StrategyFn};

use url::Url;

use crate::network::PageFetcher;
use crate::parsers::html::html_to_dom;

/// 段落分隔符
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// 默认的样板关键字
pub const DEFAULT_BOILERPLATE_KEYWORDS: &[&str] = &[
    "advertisement",
    "sponsored",
    "follow",
    "share",
    "vote",
    "comment",
    "terms",
    "privacy",
];

/// 默认的内容容器类名片段
pub const DEFAULT_CONTENT_CLASSES: &[&str] = &[
    "story-text",
    "part-content",
    "chapter-content",
    "reading-content",
    "content",
];

/// 提取配置
///
/// 长度阈值按字符计数，段落长度必须严格大于阈值才会保留。
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// 段落标记属性
    pub marker_attribute: String,
    /// 策略 1 的长度阈值
    pub min_paragraph_chars: usize,
    /// 策略 2、3 的长度阈值
    pub min_container_chars: usize,
    /// 策略 4 的长度阈值
    pub min_page_chars: usize,
    /// 策略 4 的样板关键字（小写）
    pub boilerplate_keywords: Vec<String>,
    /// 策略 3 的容器类名片段（小写）
    pub content_classes: Vec<String>,
    /// 是否校验来源域名
    pub validate_host: bool,
    /// 允许的来源域名
    pub expected_host: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            marker_attribute: "data-p-id".to_string(),
            min_paragraph_chars: 5,
            min_container_chars: 20,
            min_page_chars: 30,
            boilerplate_keywords: DEFAULT_BOILERPLATE_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            content_classes: DEFAULT_CONTENT_CLASSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            validate_host: true,
            expected_host: "wattpad.com".to_string(),
        }
    }
}

impl ExtractionConfig {
    /// 段落是否包含样板关键字（不区分大小写）
    pub fn is_boilerplate(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.boilerplate_keywords
            .iter()
            .any(|keyword| lower.contains(keyword.as_str()))
    }

    /// 校验来源 URL
    ///
    /// 只接受 http/https；开启域名校验时，主机名必须等于期望域名或是其子域名。
    pub fn validate_url(&self, raw: &str) -> ExtractResult<Url> {
        let url = Url::parse(raw.trim())
            .map_err(|e| ExtractError::InvalidUrl(format!("{} ({})", raw.trim(), e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ExtractError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| ExtractError::InvalidUrl(format!("{} has no host", raw.trim())))?
            .to_lowercase();

        if self.validate_host {
            let expected = self.expected_host.as_str();
            let allowed = host == expected || host.ends_with(&format!(".{}", expected));
            if !allowed {
                return Err(ExtractError::HostNotAllowed {
                    host,
                    expected: self.expected_host.clone(),
                });
            }
        }

        Ok(url)
    }
}

/// 提取出的正文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryText {
    /// 按文档顺序排列的段落
    pub paragraphs: Vec<String>,
    /// 命中的策略名称
    pub strategy: &'static str,
}

impl StoryText {
    /// 以空行连接的完整正文
    pub fn text(&self) -> String {
        self.paragraphs.join(PARAGRAPH_SEPARATOR)
    }

    /// 正文字符数
    pub fn character_count(&self) -> usize {
        self.text().chars().count()
    }
}

/// 正文提取器
pub struct Extractor {
    fetcher: Box<dyn PageFetcher>,
    config: ExtractionConfig,
    strategies: Vec<Strategy>,
}

impl Extractor {
    /// 使用默认策略顺序创建提取器
    pub fn new(fetcher: Box<dyn PageFetcher>, config: ExtractionConfig) -> Self {
        Self::with_strategies(fetcher, config, default_cascade())
    }

    pub fn with_strategies(
        fetcher: Box<dyn PageFetcher>,
        config: ExtractionConfig,
        strategies: Vec<Strategy>,
    ) -> Self {
        Self {
            fetcher,
            config,
            strategies,
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// 抓取 URL 并提取正文
    pub fn extract(&self, raw_url: &str) -> ExtractResult<StoryText> {
        let url = self.config.validate_url(raw_url)?;

        tracing::info!("抓取章节页面: {}", url);
        let html = self.fetcher.fetch(&url).map_err(|e| {
            tracing::error!("页面抓取失败: {}", e);
            e
        })?;

        self.extract_from_html(&html)
    }

    /// 从已获取的 HTML 中提取正文
    pub fn extract_from_html(&self, html: &str) -> ExtractResult<StoryText> {
        let dom = html_to_dom(html.as_bytes(), "utf-8".to_string());

        for (i, strategy) in self.strategies.iter().enumerate() {
            if let Some(paragraphs) = strategy.apply(&dom.document, &self.config) {
                if i > 0 {
                    tracing::warn!("段落标记缺失，使用回退策略 '{}'", strategy.name);
                }
                tracing::info!(
                    "策略 '{}' 提取到 {} 个段落",
                    strategy.name,
                    paragraphs.len()
                );
                return Ok(StoryText {
                    paragraphs,
                    strategy: strategy.name,
                });
            }
            tracing::debug!("策略 '{}' 未命中", strategy.name);
        }

        Err(ExtractError::NoContent)
    }
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("config", &self.config)
            .field("strategies", &self.strategies)
            .finish()
    }
}
