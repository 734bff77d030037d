//! 核心装配
//!
//! [`StoryRelay`] 把正文提取与翻译组合在一起，是 HTTP 层唯一依赖的对象。
//! 所有方法都是阻塞的，异步调用方需要放到 `spawn_blocking` 中执行。

use std::sync::Arc;

use thiserror::Error;

use crate::env::{EnvConfig, EnvError};
use crate::extraction::{ExtractError, ExtractResult, ExtractionConfig, Extractor, StoryText};
use crate::network::{HttpFetcher, PageFetcher};
use crate::translation::{
    ChunkTranslator, CompletionBackend, DocumentTranslator, GroqBackend, GroqConfig, KeyPool,
    KeyPoolError, RetryPolicy, TranslatedDocument, UpstreamError,
};

/// 装配阶段的错误
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("configuration error: {0}")]
    Config(#[from] EnvError),

    #[error("{0}")]
    Keys(#[from] KeyPoolError),

    #[error("failed to build translation client: {0}")]
    Client(#[from] UpstreamError),

    #[error("failed to build page fetcher: {0}")]
    Fetcher(#[from] ExtractError),
}

/// 正文提取与翻译的组合
#[derive(Debug)]
pub struct StoryRelay {
    extractor: Extractor,
    translator: DocumentTranslator,
}

impl StoryRelay {
    pub fn new(extractor: Extractor, translator: DocumentTranslator) -> Self {
        Self {
            extractor,
            translator,
        }
    }

    /// 根据环境配置装配真实的抓取器与 Groq 后端
    pub fn from_config(config: &EnvConfig) -> Result<Self, RelayError> {
        config.validate()?;

        let extractor = Extractor::new(page_fetcher(config)?, extraction_config(config));

        let backend: Arc<dyn CompletionBackend> = Arc::new(GroqBackend::new(GroqConfig {
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: config.request_timeout,
        })?);
        let keys = Arc::new(KeyPool::new(config.api_keys.iter().cloned())?);
        let policy = RetryPolicy {
            retries_per_key: config.retries_per_key,
            retry_delay: config.retry_delay,
            chunk_delay: config.chunk_delay,
        };

        let translator = DocumentTranslator::new(
            config.chunk_size,
            ChunkTranslator::new(backend, keys, policy),
        );

        Ok(Self::new(extractor, translator))
    }

    /// 抓取章节并提取正文
    pub fn extract(&self, url: &str) -> ExtractResult<StoryText> {
        self.extractor.extract(url)
    }

    /// 翻译整篇文本，单个分块失败不会中断
    pub fn translate(&self, text: &str) -> TranslatedDocument {
        self.translator.translate(text)
    }

    pub fn key_count(&self) -> usize {
        self.translator.key_count()
    }

    pub fn chunk_size(&self) -> usize {
        self.translator.chunk_size()
    }
}

/// 环境配置中的提取参数
pub fn extraction_config(config: &EnvConfig) -> ExtractionConfig {
    ExtractionConfig {
        min_paragraph_chars: config.min_paragraph_chars,
        min_container_chars: config.min_container_chars,
        min_page_chars: config.min_page_chars,
        boilerplate_keywords: config
            .boilerplate_keywords
            .iter()
            .map(|keyword| keyword.to_lowercase())
            .collect(),
        validate_host: config.validate_host,
        expected_host: config.expected_host.clone(),
        ..ExtractionConfig::default()
    }
}

fn page_fetcher(config: &EnvConfig) -> Result<Box<dyn PageFetcher>, RelayError> {
    #[cfg(feature = "headless")]
    {
        if config.use_browser {
            tracing::info!("使用无头浏览器抓取章节");
            return Ok(Box::new(crate::network::BrowserFetcher::new(
                config.fetch_timeout,
            )));
        }
    }

    Ok(Box::new(HttpFetcher::new(config.fetch_timeout)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> EnvConfig {
        EnvConfig {
            log_level: "info".to_string(),
            api_keys: vec!["gsk_a".to_string(), "gsk_b".to_string()],
            api_url: crate::translation::DEFAULT_API_URL.to_string(),
            model: crate::translation::DEFAULT_MODEL.to_string(),
            temperature: 0.4,
            request_timeout: Duration::from_secs(90),
            chunk_size: 1500,
            retries_per_key: 3,
            retry_delay: Duration::from_secs(1),
            chunk_delay: Duration::from_millis(500),
            fetch_timeout: Duration::from_secs(15),
            validate_host: false,
            expected_host: "wattpad.com".to_string(),
            use_browser: false,
            min_paragraph_chars: 7,
            min_container_chars: 20,
            min_page_chars: 30,
            boilerplate_keywords: vec!["Promo".to_string()],
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
        }
    }

    #[test]
    fn test_extraction_config_from_env() {
        let extraction = extraction_config(&config());
        assert_eq!(extraction.min_paragraph_chars, 7);
        assert!(!extraction.validate_host);
        assert_eq!(extraction.boilerplate_keywords, vec!["promo"]);
        assert_eq!(extraction.marker_attribute, "data-p-id");
    }

    #[test]
    fn test_relay_from_config() {
        let relay = StoryRelay::from_config(&config()).unwrap();
        assert_eq!(relay.key_count(), 2);
        assert_eq!(relay.chunk_size(), 1500);
    }

    #[test]
    fn test_relay_requires_keys() {
        let mut config = config();
        config.api_keys.clear();
        assert!(matches!(
            StoryRelay::from_config(&config),
            Err(RelayError::Config(_))
        ));
    }
}
