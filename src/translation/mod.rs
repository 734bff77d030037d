//! 翻译模块
//!
//! 把英文正文分块后逐块提交到 Groq 补全接口，译为缅甸语后按原顺序拼接：
//! - **chunker**: 按字符位置切分文本
//! - **client**: 补全接口后端
//! - **keys**: 共享的 API 密钥池
//! - **retry**: 重试与节流策略
//! - **translator**: 分块重试循环与整篇翻译
//! - **assembler**: 译文拼接
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wattpad_burmese::translation::{
//!     ChunkTranslator, DocumentTranslator, GroqBackend, GroqConfig, KeyPool, RetryPolicy,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(GroqBackend::new(GroqConfig::default())?);
//! let keys = Arc::new(KeyPool::new(vec!["gsk_example"])?);
//! let translator = ChunkTranslator::new(backend, keys, RetryPolicy::default());
//!
//! let document = DocumentTranslator::new(1500, translator).translate("Once upon a time...");
//! println!("{}", document.translation);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// 子模块声明
// ============================================================================

pub mod assembler;
pub mod chunker;
pub mod client;
pub mod error;
pub mod keys;
pub mod prompts;
pub mod retry;
pub mod translator;

// ============================================================================
// 公共API重新导出
// ============================================================================

pub use assembler::{assemble, ChunkOutcome, TranslatedDocument, CHUNK_SEPARATOR, FAILURE_MARKER};
pub use chunker::{chunk_count, chunk_text};
pub use client::{CompletionBackend, GroqBackend, GroqConfig, DEFAULT_API_URL, DEFAULT_MODEL};
pub use error::{KeyPoolError, RetryAction, UpstreamError, UpstreamResult};
pub use keys::KeyPool;
pub use retry::RetryPolicy;
pub use translator::{ChunkTranslator, DocumentTranslator};
