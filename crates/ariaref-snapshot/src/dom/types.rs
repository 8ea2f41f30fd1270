//! Node, element and style types of the DOM arena.

use serde::{Deserialize, Serialize};

/// Index of a node inside its [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Layout rectangle in CSS pixels, relative to its frame's viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Computed style properties the snapshot reads. `None` means not captured;
/// the probe falls back to the initial or tag-default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub display: Option<String>,
    pub visibility: Option<String>,
    pub opacity: Option<f64>,
    pub cursor: Option<String>,
    pub pointer_events: Option<String>,
    /// Computed `content` of `::before`.
    pub before_content: Option<String>,
    /// Computed `content` of `::after`.
    pub after_content: Option<String>,
}

/// Content document of an iframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameContent {
    /// Readable document; holds its root element.
    SameOrigin(NodeId),
    CrossOrigin,
}

#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub style: Style,
    pub rect: Option<Rect>,
    pub shadow_root: Option<NodeId>,
    /// Nodes assigned to this `<slot>`.
    pub assigned_nodes: Vec<NodeId>,
    pub frame: Option<FrameContent>,

    // Live form state. `None` falls back to the matching attribute.
    pub value: Option<String>,
    pub checked: Option<bool>,
    pub indeterminate: bool,
    pub selected: Option<bool>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
    /// Shadow root.
    Fragment,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Shadow host, for fragments.
    pub host: Option<NodeId>,
    /// Rendered through a slot instead of its parent.
    pub slotted: bool,
    /// Index assigned by the page capture script.
    pub capture_id: Option<u64>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            host: None,
            slotted: false,
            capture_id: None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }
}
