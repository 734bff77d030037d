//! # Wattpad Burmese Library
//!
//! 抓取 Wattpad 章节正文，并通过 Groq 补全接口分块翻译为缅甸语。
//!
//! ## 模块组织
//!
//! - `core` - 提取与翻译的装配
//! - `env` - 环境变量配置
//! - `extraction` - 正文提取策略
//! - `network` - 页面抓取（HTTP 与可选的无头浏览器）
//! - `parsers` - HTML 解析与 DOM 查询
//! - `translation` - 分块、重试与密钥轮换
//! - `web` - Web服务器功能（可选）

pub mod core;
pub mod env;
pub mod extraction;
pub mod network;
pub mod parsers;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items for convenience
pub use crate::core::{RelayError, StoryRelay};
pub use extraction::{ExtractError, ExtractionConfig, Extractor, StoryText};
pub use network::{HttpFetcher, PageFetcher};
pub use translation::{DocumentTranslator, TranslatedDocument, FAILURE_MARKER};
