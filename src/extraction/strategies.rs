//! 正文提取策略
//!
//! 每个策略接收解析后的文档根节点，返回按文档顺序排列的段落；
//! 没有命中时返回 `None`。[`default_cascade`] 给出尝试顺序。

use markup5ever_rcdom::Handle;

use super::ExtractionConfig;
use crate::parsers::html::{
    class_contains, find_elements, find_first_element, find_nodes, find_outermost_elements,
    get_node_attr, get_node_name, get_text_content, has_node_attr,
};

/// 策略函数签名
pub type StrategyFn = fn(&Handle, &ExtractionConfig) -> Option<Vec<String>>;

/// 命名的提取策略
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub select: StrategyFn,
}

impl Strategy {
    pub const fn new(name: &'static str, select: StrategyFn) -> Self {
        Self { name, select }
    }

    /// 运行策略，空结果视为未命中
    pub fn apply(&self, document: &Handle, config: &ExtractionConfig) -> Option<Vec<String>> {
        (self.select)(document, config).filter(|paragraphs| !paragraphs.is_empty())
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

/// 默认的策略顺序
pub fn default_cascade() -> Vec<Strategy> {
    vec![
        Strategy::new("story-markers", story_markers),
        Strategy::new("primary-container", primary_container),
        Strategy::new("content-classes", content_classes),
        Strategy::new("page-paragraphs", page_paragraphs),
        Strategy::new("page-text", page_text),
    ]
}

/// 1. 带有段落标记属性的元素
pub fn story_markers(document: &Handle, config: &ExtractionConfig) -> Option<Vec<String>> {
    let marked = find_elements(document, &|node| {
        has_node_attr(node, &config.marker_attribute)
    });

    non_empty(longer_than(&marked, config.min_paragraph_chars))
}

/// 2. 主内容容器（article / main / role=main）中的段落
pub fn primary_container(document: &Handle, config: &ExtractionConfig) -> Option<Vec<String>> {
    let container = find_first_element(document, &|node| get_node_name(node) == Some("article"))
        .or_else(|| find_first_element(document, &|node| get_node_name(node) == Some("main")))
        .or_else(|| {
            find_first_element(document, &|node| {
                get_node_attr(node, "role").as_deref() == Some("main")
            })
        })?;

    let paragraphs = find_nodes(&container, vec!["p"]);
    non_empty(longer_than(&paragraphs, config.min_container_chars))
}

/// 3. 具名内容类容器中的段落
pub fn content_classes(document: &Handle, config: &ExtractionConfig) -> Option<Vec<String>> {
    let containers = find_outermost_elements(document, &|node| {
        config
            .content_classes
            .iter()
            .any(|class| class_contains(node, class))
    });

    let paragraphs: Vec<Handle> = containers
        .iter()
        .flat_map(|container| find_nodes(container, vec!["p"]))
        .collect();

    non_empty(longer_than(&paragraphs, config.min_container_chars))
}

/// 4. 全页段落，排除样板文字
pub fn page_paragraphs(document: &Handle, config: &ExtractionConfig) -> Option<Vec<String>> {
    let paragraphs = find_elements(document, &|node| get_node_name(node) == Some("p"));

    let texts = longer_than(&paragraphs, config.min_page_chars)
        .into_iter()
        .filter(|text| !config.is_boilerplate(text))
        .collect();

    non_empty(texts)
}

/// 5. 最后手段：整页文本按行切分
pub fn page_text(document: &Handle, _config: &ExtractionConfig) -> Option<Vec<String>> {
    let root = find_nodes(document, vec!["html", "body"])
        .into_iter()
        .next()
        .unwrap_or_else(|| document.clone());

    let lines = get_text_content(&root)
        .lines()
        .map(str::to_string)
        .collect();

    non_empty(lines)
}

fn longer_than(nodes: &[Handle], floor: usize) -> Vec<String> {
    nodes
        .iter()
        .map(get_text_content)
        .filter(|text| text.chars().count() > floor)
        .collect()
}

fn non_empty(paragraphs: Vec<String>) -> Option<Vec<String>> {
    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::html_to_dom;

    fn run(strategy: StrategyFn, html: &str) -> Option<Vec<String>> {
        let dom = html_to_dom(html.as_bytes(), "utf-8".to_string());
        strategy(&dom.document, &ExtractionConfig::default())
    }

    #[test]
    fn test_story_markers_apply_length_floor() {
        let html = r#"<body>
            <p data-p-id="a1">Hi!</p>
            <p data-p-id="a2">She opened the door slowly.</p>
            <p>Unmarked paragraph that is long enough.</p>
        </body>"#;

        let paragraphs = run(story_markers, html).unwrap();
        assert_eq!(paragraphs, vec!["She opened the door slowly."]);
    }

    #[test]
    fn test_story_markers_miss_without_attribute() {
        assert!(run(story_markers, "<body><p>Plain paragraph text here.</p></body>").is_none());
    }

    #[test]
    fn test_primary_container_prefers_article() {
        let html = r#"<body>
            <main><p>Main paragraph which is long enough to count.</p></main>
            <article>
                <p>Too short here.</p>
                <p>The article paragraph is comfortably over the floor.</p>
            </article>
        </body>"#;

        let paragraphs = run(primary_container, html).unwrap();
        assert_eq!(
            paragraphs,
            vec!["The article paragraph is comfortably over the floor."]
        );
    }

    #[test]
    fn test_primary_container_role_main() {
        let html = r#"<body><div role="main"><p>Paragraph inside a role=main wrapper.</p></div></body>"#;
        assert_eq!(run(primary_container, html).unwrap().len(), 1);
    }

    #[test]
    fn test_content_classes_do_not_double_count_nested_containers() {
        let html = r#"<body>
            <div class="part-content">
                <div class="story-text"><p>Nested story paragraph long enough.</p></div>
            </div>
        </body>"#;

        assert_eq!(run(content_classes, html).unwrap().len(), 1);
    }

    #[test]
    fn test_page_paragraphs_exclude_boilerplate() {
        let html = r#"<body>
            <p>Don't forget to VOTE and leave a comment below!!</p>
            <p>The rain kept falling long after the train had left.</p>
            <p>Short one.</p>
        </body>"#;

        let paragraphs = run(page_paragraphs, html).unwrap();
        assert_eq!(
            paragraphs,
            vec!["The rain kept falling long after the train had left."]
        );
    }

    #[test]
    fn test_page_text_ignores_scripts() {
        let html = r#"<body><script>var x = 1;</script><div>Line one</div><div>Line two</div></body>"#;
        assert_eq!(run(page_text, html).unwrap(), vec!["Line one", "Line two"]);
    }

    #[test]
    fn test_cascade_order() {
        let names: Vec<&str> = default_cascade().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "story-markers",
                "primary-container",
                "content-classes",
                "page-paragraphs",
                "page-text"
            ]
        );
    }
}
