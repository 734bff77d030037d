use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::utils::{collapse_whitespace, is_block_element, SKIPPED_ELEMENTS};

/// 将 HTML 字节转换为 DOM
pub fn html_to_dom(data: &[u8], document_encoding: String) -> RcDom {
    let s: String;

    if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        let (string, _, _) = encoding.decode(data);
        s = string.to_string();
    } else {
        s = String::from_utf8_lossy(data).to_string();
    }

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut s.as_bytes())
        .unwrap_or_default()
}

/// 查找指定路径的DOM节点
pub fn find_nodes(node: &Handle, node_names: Vec<&str>) -> Vec<Handle> {
    if node_names.is_empty() {
        return Vec::new();
    }

    let mut found_nodes = Vec::new();
    let node_name = node_names[0];

    if node_names.len() == 1 {
        if let NodeData::Element { ref name, .. } = node.data {
            if &*name.local == node_name {
                found_nodes.push(node.clone());
            }
        }

        for child_node in node.children.borrow().iter() {
            found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
        }
    } else if let NodeData::Element { ref name, .. } = node.data {
        if &*name.local == node_name {
            let mut new_node_names = node_names;
            new_node_names.remove(0);
            found_nodes.append(&mut find_nodes(node, new_node_names));
        } else {
            for child_node in node.children.borrow().iter() {
                found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
            }
        }
    } else {
        for child_node in node.children.borrow().iter() {
            found_nodes.append(&mut find_nodes(child_node, node_names.clone()));
        }
    }

    found_nodes
}

/// 按文档顺序收集满足条件的元素
///
/// 不会进入 `script`/`style`/`noscript`/`template` 子树。
pub fn find_elements<F>(node: &Handle, predicate: &F) -> Vec<Handle>
where
    F: Fn(&Handle) -> bool,
{
    let mut found = Vec::new();
    collect_elements(node, predicate, &mut found);
    found
}

fn collect_elements<F>(node: &Handle, predicate: &F, found: &mut Vec<Handle>)
where
    F: Fn(&Handle) -> bool,
{
    if let Some(name) = get_node_name(node) {
        if SKIPPED_ELEMENTS.contains(&name) {
            return;
        }
        if predicate(node) {
            found.push(node.clone());
        }
    }

    for child_node in node.children.borrow().iter() {
        collect_elements(child_node, predicate, found);
    }
}

/// 按文档顺序收集满足条件的最外层元素
///
/// 命中的元素不再向下搜索，嵌套的同类容器只返回外层。
pub fn find_outermost_elements<F>(node: &Handle, predicate: &F) -> Vec<Handle>
where
    F: Fn(&Handle) -> bool,
{
    let mut found = Vec::new();
    collect_outermost(node, predicate, &mut found);
    found
}

fn collect_outermost<F>(node: &Handle, predicate: &F, found: &mut Vec<Handle>)
where
    F: Fn(&Handle) -> bool,
{
    if let Some(name) = get_node_name(node) {
        if SKIPPED_ELEMENTS.contains(&name) {
            return;
        }
        if predicate(node) {
            found.push(node.clone());
            return;
        }
    }

    for child_node in node.children.borrow().iter() {
        collect_outermost(child_node, predicate, found);
    }
}

/// 按文档顺序查找第一个满足条件的元素
pub fn find_first_element<F>(node: &Handle, predicate: &F) -> Option<Handle>
where
    F: Fn(&Handle) -> bool,
{
    if let Some(name) = get_node_name(node) {
        if SKIPPED_ELEMENTS.contains(&name) {
            return None;
        }
        if predicate(node) {
            return Some(node.clone());
        }
    }

    let children = node.children.borrow();
    let found = children
        .iter()
        .find_map(|child_node| find_first_element(child_node, predicate));
    found
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// 检查节点是否带有某个属性（值可以为空）
pub fn has_node_attr(node: &Handle, attr_name: &str) -> bool {
    get_node_attr(node, attr_name).is_some()
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 检查节点的 class 列表中是否有包含 `fragment` 的类名
pub fn class_contains(node: &Handle, fragment: &str) -> bool {
    get_node_attr(node, "class")
        .map(|classes| {
            classes
                .split_ascii_whitespace()
                .any(|class| class.to_lowercase().contains(fragment))
        })
        .unwrap_or(false)
}

/// 获取节点的纯文本内容
///
/// 行内空白被折叠为单个空格；`<br>` 与块级元素边界产生换行。
/// 结果两端已去除空白。
pub fn get_text_content(node: &Handle) -> String {
    let mut raw = String::new();
    push_text(node, &mut raw);

    raw.lines()
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => {
            // 源码中的换行只是空白
            out.extend(contents.borrow().chars().map(|c| match c {
                '\n' | '\r' => ' ',
                c => c,
            }));
        }
        NodeData::Element { name, .. } => {
            let name = name.local.as_ref();
            if SKIPPED_ELEMENTS.contains(&name) {
                return;
            }
            if name == "br" {
                out.push('\n');
                return;
            }

            let block = is_block_element(name);
            if block {
                out.push('\n');
            }
            for child_node in node.children.borrow().iter() {
                push_text(child_node, out);
            }
            if block {
                out.push('\n');
            }
        }
        NodeData::Document => {
            for child_node in node.children.borrow().iter() {
                push_text(child_node, out);
            }
        }
        _ => {}
    }
}
