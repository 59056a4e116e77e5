//! Helper functions for tree-sitter AST navigation.

use tree_sitter::Node;

/// Get the text content of a node.
pub fn get_node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    let start = node.start_byte();
    let end = node.end_byte();
    if start < source.len() && end <= source.len() && start < end {
        &source[start..end]
    } else {
        ""
    }
}

/// Find the first child of a specific type.
#[allow(clippy::manual_find)]
pub fn find_child_by_type<'a>(node: &Node<'a>, type_name: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == type_name {
            return Some(child);
        }
    }
    None
}

/// Find the first error or missing node in a subtree, depth first.
pub fn find_error_node<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    if node.is_error() || node.is_missing() {
        return Some(*node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_error_node(&child) {
            return Some(found);
        }
    }
    None
}

/// Get line number (1-indexed) from a node.
pub fn get_start_line(node: &Node) -> u32 {
    node.start_position().row as u32 + 1
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Go visibility: an identifier is exported when it starts with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}
