//! Tree normalization: string merging and generic-node collapsing.

use crate::tree::{AriaChild, AriaNode};

/// Drop zero-width characters, trim, and collapse whitespace runs to one space.
pub fn normalize_whitespace(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|&c| c != '\u{200b}' && c != '\u{00ad}')
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Run both normalization passes.
pub fn normalize(root: &mut AriaNode) {
    normalize_string_children(root);
    collapse_generic_nodes(root);
}

/// Merge adjacent string children into one normalized string, drop empty
/// ones, and discard a sole string child that repeats the node's name.
pub fn normalize_string_children(node: &mut AriaNode) {
    let children = std::mem::take(&mut node.children);
    let mut merged: Vec<AriaChild> = Vec::with_capacity(children.len());
    let mut buffer: Vec<String> = Vec::new();

    fn flush(buffer: &mut Vec<String>, merged: &mut Vec<AriaChild>) {
        if buffer.is_empty() {
            return;
        }
        let text = normalize_whitespace(&buffer.concat());
        buffer.clear();
        if !text.is_empty() {
            merged.push(AriaChild::Text(text));
        }
    }

    for child in children {
        match child {
            AriaChild::Text(text) => buffer.push(text),
            AriaChild::Node(mut inner) => {
                flush(&mut buffer, &mut merged);
                normalize_string_children(&mut inner);
                merged.push(AriaChild::Node(inner));
            }
        }
    }
    flush(&mut buffer, &mut merged);

    if let [AriaChild::Text(only)] = merged.as_slice() {
        if *only == node.name {
            merged.clear();
        }
    }
    node.children = merged;
}

/// Replace `generic` nodes that have at most one child, every child being a
/// visible pointer target, with their children. Runs bottom-up; the root is
/// never removed.
pub fn collapse_generic_nodes(node: &mut AriaNode) {
    let children = std::mem::take(&mut node.children);
    let mut result = Vec::with_capacity(children.len());
    for child in children {
        match child {
            AriaChild::Text(text) => result.push(AriaChild::Text(text)),
            AriaChild::Node(mut inner) => {
                collapse_generic_nodes(&mut inner);
                if is_collapsible(&inner) {
                    result.extend(inner.children);
                } else {
                    result.push(AriaChild::Node(inner));
                }
            }
        }
    }
    node.children = result;
}

fn is_collapsible(node: &AriaNode) -> bool {
    node.role == "generic"
        && node.children.len() <= 1
        && node.children.iter().all(|child| match child {
            AriaChild::Node(inner) => inner.is_pointer_target(),
            AriaChild::Text(_) => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ElementBox;

    fn shown(mut node: AriaNode) -> AriaNode {
        node.element_box = Some(ElementBox {
            visible: true,
            rect: None,
            style: None,
            in_viewport: true,
        });
        node
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
        assert_eq!(normalize_whitespace("soft\u{00ad}hy\u{200b}phen"), "softhyphen");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_adjacent_strings_merge() {
        let mut node = AriaNode::new("paragraph", "")
            .with_child(" ")
            .with_child("Hello ")
            .with_child("  world")
            .with_child(AriaNode::new("link", "x"))
            .with_child(" ")
            .with_child("");
        normalize_string_children(&mut node);
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].as_text(), Some("Hello world"));
        assert!(node.children[1].as_node().is_some());
    }

    #[test]
    fn test_sole_child_equal_to_name_dropped() {
        let mut node = AriaNode::new("button", "Save").with_child(" Save ");
        normalize_string_children(&mut node);
        assert!(node.children.is_empty());

        let mut node = AriaNode::new("button", "Save").with_child("Save now");
        normalize_string_children(&mut node);
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_generic_with_single_target_collapses() {
        let button = shown(AriaNode::new("button", "Go").with_ref("E2"));
        let mut root = AriaNode::fragment()
            .with_child(AriaNode::new("generic", "").with_child(button.clone()));
        collapse_generic_nodes(&mut root);
        assert_eq!(root.children, vec![AriaChild::Node(button)]);
    }

    #[test]
    fn test_empty_generic_removed() {
        let mut root = AriaNode::fragment().with_child(AriaNode::new("generic", ""));
        collapse_generic_nodes(&mut root);
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_generic_with_text_kept() {
        let mut root = AriaNode::fragment().with_child(AriaNode::new("generic", "").with_child("hi"));
        collapse_generic_nodes(&mut root);
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_generic_with_two_children_kept() {
        let a = shown(AriaNode::new("button", "a"));
        let b = shown(AriaNode::new("button", "b"));
        let mut root = AriaNode::fragment().with_child(
            AriaNode::new("generic", "").with_child(a).with_child(b),
        );
        collapse_generic_nodes(&mut root);
        assert_eq!(root.children[0].as_node().map(|n| n.role.as_str()), Some("generic"));
    }

    #[test]
    fn test_nested_generics_collapse_bottom_up() {
        let button = shown(AriaNode::new("button", "Go"));
        let mut root = AriaNode::fragment().with_child(
            AriaNode::new("generic", "")
                .with_child(AriaNode::new("generic", "").with_child(button.clone())),
        );
        collapse_generic_nodes(&mut root);
        assert_eq!(root.children, vec![AriaChild::Node(button)]);
    }

    #[test]
    fn test_generic_with_hidden_child_kept() {
        let hidden = AriaNode::new("button", "Go");
        let mut root = AriaNode::fragment()
            .with_child(AriaNode::new("generic", "").with_child(hidden));
        collapse_generic_nodes(&mut root);
        assert_eq!(root.children[0].as_node().map(|n| n.role.as_str()), Some("generic"));
    }
}
