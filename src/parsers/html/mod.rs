//! HTML解析和处理模块
//!
//! - `utils`: 基础工具函数和常量
//! - `dom`: 基础DOM操作与文本提取

pub mod dom;
pub mod utils;

pub use dom::{
    class_contains, find_elements, find_first_element, find_nodes, find_outermost_elements, get_node_attr, get_node_name,
    get_text_content, has_node_attr, html_to_dom,
};
pub use utils::{collapse_whitespace, is_block_element, SKIPPED_ELEMENTS, WHITESPACES};
