//! Conversion of a serialized page capture into a [`Document`].
//!
//! The page-side capture script emits raw DOM structure, computed style,
//! layout rectangles and live form state. Every node carries the index the
//! script stored it under, so markers written here can be committed back to
//! the live page.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Document, ElementData, FrameContent, MARKER_ATTRIBUTE, Node, NodeId, NodeKind, Rect, Style};

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture root must be an element")]
    RootNotElement,

    #[error("frame body must be an element")]
    FrameBodyNotElement,

    #[error("slot assigns unknown node {0}")]
    UnknownNode(u64),

    #[error("invalid capture payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whole-page capture.
#[derive(Debug, Clone, Deserialize)]
pub struct CapturedPage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub viewport: Option<Rect>,
    pub root: CapturedNode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapturedNode {
    Text {
        id: u64,
        text: String,
        #[serde(default)]
        slotted: bool,
    },
    Element(CapturedElement),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CapturedElement {
    pub id: u64,
    pub tag: String,
    #[serde(default)]
    pub attrs: Vec<(String, String)>,
    #[serde(default)]
    pub style: CapturedStyle,
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub checked: Option<bool>,
    #[serde(default)]
    pub indeterminate: bool,
    #[serde(default)]
    pub selected: Option<bool>,
    #[serde(default)]
    pub slotted: bool,
    #[serde(default)]
    pub children: Vec<CapturedNode>,
    #[serde(default)]
    pub shadow: Option<Vec<CapturedNode>>,
    /// Capture ids of nodes assigned to this slot.
    #[serde(default)]
    pub assigned: Vec<u64>,
    #[serde(default)]
    pub frame: Option<CapturedFrame>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedStyle {
    pub display: Option<String>,
    pub visibility: Option<String>,
    pub opacity: Option<f64>,
    pub cursor: Option<String>,
    pub pointer_events: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl From<CapturedStyle> for Style {
    fn from(style: CapturedStyle) -> Self {
        Style {
            display: style.display,
            visibility: style.visibility,
            opacity: style.opacity,
            cursor: style.cursor,
            pointer_events: style.pointer_events,
            before_content: style.before,
            after_content: style.after,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum CapturedFrame {
    SameOrigin { body: Box<CapturedNode> },
    CrossOrigin,
}

/// A marker to set on the live element stored under `capture_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerWrite {
    #[serde(rename = "id")]
    pub capture_id: u64,
    #[serde(rename = "ref")]
    pub aria_ref: String,
}

struct Importer {
    by_capture_id: HashMap<u64, NodeId>,
    pending_slots: Vec<(NodeId, Vec<u64>)>,
}

impl Document {
    /// Parse a capture payload produced by the page script.
    pub fn from_capture_json(json: &str) -> Result<(Self, Option<String>), CaptureError> {
        let page: CapturedPage = serde_json::from_str(json)?;
        let url = page.url.clone();
        Ok((Self::from_capture(page)?, url))
    }

    pub fn from_capture(page: CapturedPage) -> Result<Self, CaptureError> {
        let CapturedNode::Element(root) = page.root else {
            return Err(CaptureError::RootNotElement);
        };

        let mut doc = Document {
            nodes: Vec::new(),
            root: NodeId(0),
            viewport: page.viewport,
        };
        let mut importer = Importer {
            by_capture_id: HashMap::new(),
            pending_slots: Vec::new(),
        };

        doc.root = importer.element(&mut doc, root, None)?;

        for (slot, ids) in std::mem::take(&mut importer.pending_slots) {
            for capture_id in ids {
                let node = importer
                    .by_capture_id
                    .get(&capture_id)
                    .copied()
                    .ok_or(CaptureError::UnknownNode(capture_id))?;
                doc.assign_to_slot(slot, node);
            }
        }

        Ok(doc)
    }

    /// Markers set by the last build, keyed by capture id.
    pub fn marker_writes(&self) -> Vec<MarkerWrite> {
        self.nodes
            .iter()
            .filter_map(|node| {
                let NodeKind::Element(data) = &node.kind else {
                    return None;
                };
                let aria_ref = data.attribute(MARKER_ATTRIBUTE)?;
                Some(MarkerWrite {
                    capture_id: node.capture_id?,
                    aria_ref: aria_ref.to_string(),
                })
            })
            .collect()
    }
}

impl Importer {
    fn node(
        &mut self,
        doc: &mut Document,
        captured: CapturedNode,
        parent: NodeId,
    ) -> Result<NodeId, CaptureError> {
        match captured {
            CapturedNode::Text { id, text, slotted } => {
                let node = doc.push(NodeKind::Text(text), Some(parent));
                self.register(doc, node, id, slotted);
                Ok(node)
            }
            CapturedNode::Element(element) => self.element(doc, element, Some(parent)),
        }
    }

    fn element(
        &mut self,
        doc: &mut Document,
        captured: CapturedElement,
        parent: Option<NodeId>,
    ) -> Result<NodeId, CaptureError> {
        let mut data = ElementData::new(&captured.tag);
        data.attributes = captured.attrs;
        data.style = captured.style.into();
        data.rect = captured.rect;
        data.value = captured.value;
        data.checked = captured.checked;
        data.indeterminate = captured.indeterminate;
        data.selected = captured.selected;

        let id = doc.push(NodeKind::Element(data), parent);
        self.register(doc, id, captured.id, captured.slotted);

        for child in captured.children {
            self.node(doc, child, id)?;
        }

        if let Some(shadow_children) = captured.shadow {
            let shadow = doc.attach_shadow(id);
            for child in shadow_children {
                self.node(doc, child, shadow)?;
            }
        }

        if !captured.assigned.is_empty() {
            self.pending_slots.push((id, captured.assigned));
        }

        match captured.frame {
            Some(CapturedFrame::SameOrigin { body }) => {
                let CapturedNode::Element(body) = *body else {
                    return Err(CaptureError::FrameBodyNotElement);
                };
                let body = self.element(doc, body, None)?;
                if let Some(data) = doc.element_mut(id) {
                    data.frame = Some(FrameContent::SameOrigin(body));
                }
            }
            Some(CapturedFrame::CrossOrigin) => doc.mark_cross_origin(id),
            None => {}
        }

        Ok(id)
    }

    fn register(&mut self, doc: &mut Document, node: NodeId, capture_id: u64, slotted: bool) {
        let entry: &mut Node = doc.node_mut(node);
        entry.capture_id = Some(capture_id);
        entry.slotted = slotted;
        self.by_capture_id.insert(capture_id, node);
    }
}
