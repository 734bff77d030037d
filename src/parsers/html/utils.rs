use regex::Regex;
use std::sync::OnceLock;

/// ASCII 空白字符
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];

/// 文本收集时整体跳过的元素
pub const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// 产生换行边界的块级元素
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// 检查是否为块级元素
pub fn is_block_element(name: &str) -> bool {
    BLOCK_ELEMENTS.contains(&name)
}

/// 将连续空白折叠为单个空格并去除两端空白
pub fn collapse_whitespace(text: &str) -> String {
    static RUNS: OnceLock<Option<Regex>> = OnceLock::new();

    let trimmed = text.trim_matches(|c: char| c.is_whitespace());
    match RUNS.get_or_init(|| Regex::new(r"\s+").ok()) {
        Some(runs) => runs.replace_all(trimmed, " ").into_owned(),
        None => trimmed
            .split(WHITESPACES)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\u{a0} c  "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_block_elements() {
        assert!(is_block_element("p"));
        assert!(!is_block_element("span"));
    }
}
