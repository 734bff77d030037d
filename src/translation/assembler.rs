//! 译文拼接

use serde::Serialize;

/// 分块之间的分隔符
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// 分块翻译失败时的占位文本
pub const FAILURE_MARKER: &str = "[Translation failed for this section]";

/// 单个分块的翻译结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    Translated(String),
    /// 所有尝试均已耗尽
    Failed,
}

impl ChunkOutcome {
    /// 拼接时使用的文本
    pub fn as_text(&self) -> &str {
        match self {
            ChunkOutcome::Translated(text) => text,
            ChunkOutcome::Failed => FAILURE_MARKER,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ChunkOutcome::Failed)
    }
}

/// 拼接完成的译文
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedDocument {
    pub translation: String,
    pub original_chars: usize,
    pub translated_chars: usize,
    pub chunk_count: usize,
    pub failed_chunks: usize,
}

/// 按原顺序拼接分块结果（失败占位也会保留）
pub fn assemble(original: &str, outcomes: &[ChunkOutcome]) -> TranslatedDocument {
    let translation = outcomes
        .iter()
        .map(ChunkOutcome::as_text)
        .collect::<Vec<_>>()
        .join(CHUNK_SEPARATOR);

    TranslatedDocument {
        original_chars: original.chars().count(),
        translated_chars: translation.chars().count(),
        chunk_count: outcomes.len(),
        failed_chunks: outcomes.iter().filter(|o| o.is_failed()).count(),
        translation,
    }
}
