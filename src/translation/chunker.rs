//! 按字符位置切分文本

/// 将文本切分为不超过 `max_chars` 个字符的连续片段
///
/// 纯位置切分，不考虑句子或段落边界，切分点总在字符边界上。
/// 最后一块可能更短；空文本不产生任何分块。`max_chars` 为 0 时按 1 处理。
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

/// 计算分块数量，等于 ceil(字符数 / max_chars)
pub fn chunk_count(text: &str, max_chars: usize) -> usize {
    let chars = text.chars().count();
    let max_chars = max_chars.max(1);
    chars.div_ceil(max_chars)
}
