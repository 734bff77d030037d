//! 分块翻译与重试循环

use std::sync::Arc;

use super::assembler::{assemble, ChunkOutcome, TranslatedDocument};
use super::chunker::chunk_text;
use super::client::CompletionBackend;
use super::error::RetryAction;
use super::keys::KeyPool;
use super::retry::RetryPolicy;

/// 单个分块的翻译器
///
/// 在密钥池上执行重试循环，从不返回错误：全部尝试失败时返回
/// [`ChunkOutcome::Failed`]。
#[derive(Clone)]
pub struct ChunkTranslator {
    backend: Arc<dyn CompletionBackend>,
    keys: Arc<KeyPool>,
    policy: RetryPolicy,
}

impl ChunkTranslator {
    pub fn new(backend: Arc<dyn CompletionBackend>, keys: Arc<KeyPool>, policy: RetryPolicy) -> Self {
        Self {
            backend,
            keys,
            policy,
        }
    }

    pub fn keys(&self) -> &KeyPool {
        &self.keys
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// 翻译一个分块
    pub fn translate_chunk(&self, chunk: &str) -> ChunkOutcome {
        let max_attempts = self.policy.max_attempts(self.keys.len());

        for attempt in 1..=max_attempts {
            let (index, key) = self.keys.current();

            match self.backend.complete(key, chunk) {
                Ok(text) => {
                    tracing::debug!("分块翻译成功 (第 {} 次尝试, 密钥 {})", attempt, index);
                    return ChunkOutcome::Translated(text);
                }
                Err(error) => match error.retry_action() {
                    RetryAction::RotateAndPause => {
                        tracing::warn!(
                            "密钥 {} 受限: {} (第 {}/{} 次尝试)",
                            index,
                            error,
                            attempt,
                            max_attempts
                        );
                        self.keys.rotate();
                        self.policy
                            .pause(self.policy.delay_after(attempt, max_attempts));
                    }
                    RetryAction::Rotate => {
                        tracing::warn!("网络错误: {} (第 {}/{} 次尝试)", error, attempt, max_attempts);
                        self.keys.rotate();
                    }
                    RetryAction::Consume => {
                        tracing::error!("上游错误: {} (第 {}/{} 次尝试)", error, attempt, max_attempts);
                    }
                },
            }
        }

        tracing::error!("分块翻译失败，已用尽 {} 次尝试", max_attempts);
        ChunkOutcome::Failed
    }
}

impl std::fmt::Debug for ChunkTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkTranslator")
            .field("keys", &self.keys)
            .field("policy", &self.policy)
            .finish()
    }
}

/// 整篇文本的翻译器：分块、逐块翻译、拼接
#[derive(Debug, Clone)]
pub struct DocumentTranslator {
    chunk_size: usize,
    translator: ChunkTranslator,
}

impl DocumentTranslator {
    pub fn new(chunk_size: usize, translator: ChunkTranslator) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            translator,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn key_count(&self) -> usize {
        self.translator.keys().len()
    }

    /// 按顺序翻译所有分块
    ///
    /// 相邻分块之间阻塞暂停；最后一个分块之后不暂停。
    pub fn translate(&self, text: &str) -> TranslatedDocument {
        let chunks = chunk_text(text, self.chunk_size);
        tracing::info!(
            "开始翻译: {} 字符, {} 个分块",
            text.chars().count(),
            chunks.len()
        );

        let mut outcomes = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            tracing::debug!("翻译分块 {}/{}", i + 1, chunks.len());
            outcomes.push(self.translator.translate_chunk(chunk));

            if i + 1 < chunks.len() {
                let policy = self.translator.policy();
                policy.pause(policy.chunk_delay);
            }
        }

        let document = assemble(text, &outcomes);
        if document.failed_chunks > 0 {
            tracing::warn!(
                "翻译完成，{}/{} 个分块失败",
                document.failed_chunks,
                document.chunk_count
            );
        } else {
            tracing::info!("翻译完成: {} 字符", document.translated_chars);
        }
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::error::{UpstreamError, UpstreamResult};
    use std::sync::Mutex;

    /// 按顺序返回预设结果，耗尽后一直返回 429
    struct Scripted {
        replies: Mutex<Vec<UpstreamResult<String>>>,
        keys_seen: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(mut replies: Vec<UpstreamResult<String>>) -> Arc<Self> {
            replies.reverse();
            Arc::new(Self {
                replies: Mutex::new(replies),
                keys_seen: Mutex::new(Vec::new()),
            })
        }

        fn keys_seen(&self) -> Vec<String> {
            self.keys_seen.lock().unwrap().clone()
        }
    }

    impl CompletionBackend for Scripted {
        fn complete(&self, api_key: &str, _chunk: &str) -> UpstreamResult<String> {
            self.keys_seen.lock().unwrap().push(api_key.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(UpstreamError::RateLimited))
        }
    }

    fn translator(backend: Arc<Scripted>, keys: &[&str]) -> ChunkTranslator {
        let pool = Arc::new(KeyPool::new(keys.iter().copied()).unwrap());
        ChunkTranslator::new(backend, pool, RetryPolicy::immediate(3))
    }

    #[test]
    fn test_network_error_rotates_key() {
        let backend = Scripted::new(vec![
            Err(UpstreamError::Network("timeout".into())),
            Ok("ok".into()),
        ]);
        let outcome = translator(Arc::clone(&backend), &["k1", "k2"]).translate_chunk("x");

        assert_eq!(outcome, ChunkOutcome::Translated("ok".into()));
        assert_eq!(backend.keys_seen(), vec!["k1", "k2"]);
    }

    #[test]
    fn test_other_status_keeps_key() {
        let backend = Scripted::new(vec![
            Err(UpstreamError::Status {
                status: 500,
                body: String::new(),
            }),
            Ok("ok".into()),
        ]);
        translator(Arc::clone(&backend), &["k1", "k2"]).translate_chunk("x");

        assert_eq!(backend.keys_seen(), vec!["k1", "k1"]);
    }

    #[test]
    fn test_always_rate_limited_exhausts_attempts() {
        let backend = Scripted::new(Vec::new());
        let outcome = translator(Arc::clone(&backend), &["k1", "k2"]).translate_chunk("x");

        assert_eq!(outcome, ChunkOutcome::Failed);
        assert_eq!(backend.keys_seen(), vec!["k1", "k2", "k1", "k2", "k1", "k2"]);
    }

    #[test]
    fn test_rotation_carries_over_between_chunks() {
        let backend = Scripted::new(vec![Err(UpstreamError::RateLimited), Ok("a".into()), Ok("b".into())]);
        let translator = translator(Arc::clone(&backend), &["k1", "k2"]);

        translator.translate_chunk("first");
        translator.translate_chunk("second");

        assert_eq!(backend.keys_seen(), vec!["k1", "k2", "k2"]);
    }

    #[test]
    fn test_document_translation_chunks_in_order() {
        let backend = Scripted::new(vec![Ok("A".into()), Ok("B".into()), Ok("C".into())]);
        let document = DocumentTranslator::new(2, translator(backend, &["k1"])).translate("abcde");

        assert_eq!(document.translation, "A\n\nB\n\nC");
        assert_eq!(document.chunk_count, 3);
        assert_eq!(document.original_chars, 5);
        assert_eq!(document.failed_chunks, 0);
    }
}
