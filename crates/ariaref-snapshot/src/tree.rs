//! Accessibility tree types.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::probe::ElementBox;
use crate::roles::TriState;

/// Child of an [`AriaNode`]: a text run or a nested node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AriaChild {
    Text(String),
    Node(AriaNode),
}

impl AriaChild {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AriaChild::Text(text) => Some(text),
            AriaChild::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&AriaNode> {
        match self {
            AriaChild::Node(node) => Some(node),
            AriaChild::Text(_) => None,
        }
    }
}

impl From<AriaNode> for AriaChild {
    fn from(node: AriaNode) -> Self {
        AriaChild::Node(node)
    }
}

impl From<&str> for AriaChild {
    fn from(text: &str) -> Self {
        AriaChild::Text(text.to_string())
    }
}

/// One node of the accessibility tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AriaNode {
    pub role: String,
    pub name: String,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub aria_ref: Option<String>,
    pub children: Vec<AriaChild>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, String>,
    #[serde(skip)]
    pub element_box: Option<ElementBox>,
    pub receives_pointer_events: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<TriState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressed: Option<TriState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl AriaNode {
    pub fn new(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            name: name.into(),
            aria_ref: None,
            children: Vec::new(),
            props: BTreeMap::new(),
            element_box: None,
            receives_pointer_events: true,
            checked: None,
            disabled: None,
            expanded: None,
            level: None,
            pressed: None,
            selected: None,
        }
    }

    /// Unnamed root wrapper.
    pub fn fragment() -> Self {
        Self::new("fragment", "")
    }

    pub fn is_fragment(&self) -> bool {
        self.role == "fragment"
    }

    pub fn with_ref(mut self, aria_ref: impl Into<String>) -> Self {
        self.aria_ref = Some(aria_ref.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<AriaChild>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn is_visible(&self) -> bool {
        self.element_box.as_ref().is_some_and(|b| b.visible)
    }

    /// Visible and reachable by pointer input: the condition for holding a ref.
    pub fn is_pointer_target(&self) -> bool {
        self.is_visible() && self.receives_pointer_events
    }

    /// Depth-first iterator over this node and all descendant nodes.
    pub fn walk(&self) -> Vec<&AriaNode> {
        let mut out = vec![self];
        for child in &self.children {
            if let AriaChild::Node(node) = child {
                out.extend(node.walk());
            }
        }
        out
    }

    /// All refs in document order.
    pub fn refs(&self) -> Vec<&str> {
        self.walk()
            .into_iter()
            .filter_map(|n| n.aria_ref.as_deref())
            .collect()
    }
}

/// Sequential `E<n>` ref source shared across one top-level snapshot,
/// iframe subtrees included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefCounter {
    last: u32,
}

impl RefCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_ref(&mut self) -> String {
        self.last += 1;
        format!("E{}", self.last)
    }

    /// Refs handed out so far.
    pub fn count(&self) -> u32 {
        self.last
    }
}
