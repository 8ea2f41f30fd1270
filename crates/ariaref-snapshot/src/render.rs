//! Indented YAML-like rendering of an accessibility tree.
//!
//! ```text
//! - heading "Sign in" [level=1] [ref=E1]
//! - textbox "Email" [ref=E2]
//! - link "Forgot password?" [ref=E3] [cursor=pointer]:
//!   - /url: /reset
//! ```

use crate::roles::TriState;
use crate::tree::{AriaChild, AriaNode};
use crate::yaml::{escape_key_if_needed, escape_value_if_needed};

/// Accessible names longer than this are truncated.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 900;

const INDENT: &str = "  ";

/// Renders trees as snapshot text.
#[derive(Debug, Clone)]
pub struct Renderer {
    max_name_length: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_name_length(mut self, max: usize) -> Self {
        self.max_name_length = max;
        self
    }

    /// Render `root`. A fragment root contributes only its children.
    pub fn render(&self, root: &AriaNode) -> String {
        let mut lines = Vec::new();
        if root.is_fragment() {
            for child in &root.children {
                self.render_child(child, "", &mut lines);
            }
        } else {
            self.render_node(root, "", &mut lines);
        }
        lines.join("\n")
    }

    fn render_child(&self, child: &AriaChild, indent: &str, lines: &mut Vec<String>) {
        match child {
            AriaChild::Text(text) => {
                if !text.is_empty() {
                    lines.push(format!("{}- text: {}", indent, escape_value_if_needed(text)));
                }
            }
            AriaChild::Node(node) => self.render_node(node, indent, lines),
        }
    }

    fn render_node(&self, node: &AriaNode, indent: &str, lines: &mut Vec<String>) {
        let key = format!("{}- {}", indent, escape_key_if_needed(&self.node_key(node)));

        match node.children.as_slice() {
            [] if node.props.is_empty() => lines.push(key),
            [AriaChild::Text(text)] if node.props.is_empty() => {
                if text.is_empty() {
                    lines.push(key);
                } else {
                    lines.push(format!("{}: {}", key, escape_value_if_needed(text)));
                }
            }
            children => {
                lines.push(format!("{}:", key));
                let nested = format!("{}{}", indent, INDENT);
                for (name, value) in &node.props {
                    lines.push(format!("{}- /{}: {}", nested, name, escape_value_if_needed(value)));
                }
                for child in children {
                    self.render_child(child, &nested, lines);
                }
            }
        }
    }

    /// Role, quoted name, state annotations, ref and cursor hint.
    pub fn node_key(&self, node: &AriaNode) -> String {
        let mut key = node.role.clone();
        if !node.name.is_empty() {
            let name = self.truncate(&node.name);
            key.push(' ');
            key.push_str(&serde_json::to_string(&name).unwrap_or_else(|_| format!("\"{}\"", name)));
        }

        match node.checked {
            Some(TriState::Mixed) => key.push_str(" [checked=mixed]"),
            Some(TriState::True) => key.push_str(" [checked]"),
            _ => {}
        }
        if node.disabled == Some(true) {
            key.push_str(" [disabled]");
        }
        if node.expanded == Some(true) {
            key.push_str(" [expanded]");
        }
        if let Some(level) = node.level {
            key.push_str(&format!(" [level={}]", level));
        }
        match node.pressed {
            Some(TriState::Mixed) => key.push_str(" [pressed=mixed]"),
            Some(TriState::True) => key.push_str(" [pressed]"),
            _ => {}
        }
        if node.selected == Some(true) {
            key.push_str(" [selected]");
        }

        if let Some(aria_ref) = &node.aria_ref {
            key.push_str(&format!(" [ref={}]", aria_ref));
            let pointer_cursor = node
                .element_box
                .as_ref()
                .and_then(|b| b.cursor())
                .is_some_and(|c| c == "pointer");
            if pointer_cursor {
                key.push_str(" [cursor=pointer]");
            }
        }
        key
    }

    fn truncate(&self, name: &str) -> String {
        if name.chars().count() <= self.max_name_length {
            return name.to_string();
        }
        let mut cut: String = name.chars().take(self.max_name_length).collect();
        cut.push('…');
        cut
    }
}

/// Render with default limits.
pub fn render(root: &AriaNode) -> String {
    Renderer::default().render(root)
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
