//! # 解析器模块
//!
//! - `html` - HTML文档解析、DOM查询、文本提取

pub mod html;

// Re-export commonly used items for convenience
pub use html::{find_elements, get_node_attr, get_text_content, html_to_dom};
