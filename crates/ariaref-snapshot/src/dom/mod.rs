//! Arena DOM model walked by the tree builder.
//!
//! A [`Document`] holds element, text and fragment nodes. Fragments stand in
//! for shadow roots; their `host` links back to the shadow host so that
//! ancestor walks follow the composed tree. Same-origin iframe documents are
//! detached subtrees referenced from the iframe element.

mod capture;
mod types;

pub use capture::{CaptureError, CapturedElement, CapturedFrame, CapturedNode, CapturedPage, CapturedStyle, MarkerWrite};
pub use types::{ElementData, FrameContent, Node, NodeId, NodeKind, Rect, Style};

/// Attribute holding the ref assigned to an element by the latest snapshot.
pub const MARKER_ATTRIBUTE: &str = "data-ariaref";

/// DOM arena.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    viewport: Option<Rect>,
}

impl Document {
    /// Create a document whose root element has the given tag (usually `body`).
    pub fn new(root_tag: &str) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            viewport: None,
        };
        doc.root = doc.push(NodeKind::Element(ElementData::new(root_tag)), None);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Lowercase tag name, or `None` for non-elements.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub(crate) fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, parent));
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Append a new element under `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData::new(tag)), Some(parent))
    }

    /// Append a new element with attributes under `parent`.
    pub fn append_element_with(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> NodeId {
        let id = self.append_element(parent, tag);
        for (name, value) in attributes {
            self.set_attribute(id, name, value);
        }
        id
    }

    /// Append a text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()), Some(parent))
    }

    /// Attach an open shadow root to `host` and return it.
    pub fn attach_shadow(&mut self, host: NodeId) -> NodeId {
        if let Some(existing) = self.element(host).and_then(|e| e.shadow_root) {
            return existing;
        }
        let shadow = self.push(NodeKind::Fragment, None);
        self.nodes[shadow.0].host = Some(host);
        if let Some(data) = self.element_mut(host) {
            data.shadow_root = Some(shadow);
        }
        shadow
    }

    /// Assign a light-DOM child to a `<slot>`.
    pub fn assign_to_slot(&mut self, slot: NodeId, node: NodeId) {
        self.nodes[node.0].slotted = true;
        if let Some(data) = self.element_mut(slot) {
            data.assigned_nodes.push(node);
        }
    }

    /// Give `iframe` a same-origin content document and return its root element.
    pub fn attach_frame_document(&mut self, iframe: NodeId, root_tag: &str) -> NodeId {
        let body = self.push(NodeKind::Element(ElementData::new(root_tag)), None);
        if let Some(data) = self.element_mut(iframe) {
            data.frame = Some(FrameContent::SameOrigin(body));
        }
        body
    }

    /// Mark `iframe` as holding a document this page cannot read.
    pub fn mark_cross_origin(&mut self, iframe: NodeId) {
        if let Some(data) = self.element_mut(iframe) {
            data.frame = Some(FrameContent::CrossOrigin);
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attribute(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(data) = self.element_mut(id) {
            data.set_attribute(name, value);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(data) = self.element_mut(id) {
            data.attributes.retain(|(n, _)| n != name);
        }
    }

    /// Parent in the composed tree: a shadow root's children continue at the host.
    pub fn composed_parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id.0].parent?;
        match self.nodes[parent.0].kind {
            NodeKind::Fragment => self.nodes[parent.0].host,
            _ => Some(parent),
        }
    }

    /// The node itself followed by its composed ancestors.
    pub fn self_and_ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.composed_parent(n))
    }

    /// Nearest ancestor (or self) element with the given tag.
    pub fn closest(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.self_and_ancestors(id)
            .find(|&n| self.tag(n) == Some(tag))
    }

    /// Light children, then shadow children, depth-first. Frame documents are
    /// not entered.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        self.push_subtree_children(id, &mut stack);
        while let Some(next) = stack.pop() {
            out.push(next);
            self.push_subtree_children(next, &mut stack);
        }
        out
    }

    fn push_subtree_children(&self, id: NodeId, stack: &mut Vec<NodeId>) {
        let node = &self.nodes[id.0];
        if let Some(shadow) = self.element(id).and_then(|e| e.shadow_root) {
            stack.extend(self.nodes[shadow.0].children.iter().rev());
        }
        stack.extend(node.children.iter().rev());
    }

    /// Outermost composed ancestor: the document root or a frame document body.
    pub fn tree_root(&self, id: NodeId) -> NodeId {
        self.self_and_ancestors(id).last().unwrap_or(id)
    }

    /// First element with `id=...` in the same (frame) document as `near`.
    pub fn element_by_id(&self, near: NodeId, element_id: &str) -> Option<NodeId> {
        let root = self.tree_root(near);
        std::iter::once(root)
            .chain(self.descendants(root))
            .find(|&n| self.attribute(n, "id") == Some(element_id))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for n in self.descendants(id) {
            if let Some(text) = self.text(n) {
                out.push_str(text);
            }
        }
        out
    }

    /// Remove marker attributes from `root` and its light and shadow subtree.
    pub fn strip_markers(&mut self, root: NodeId) {
        let mut targets = vec![root];
        targets.extend(self.descendants(root));
        for id in targets {
            self.remove_attribute(id, MARKER_ATTRIBUTE);
        }
    }

    /// Elements anywhere in the arena whose marker equals `aria_ref`.
    pub fn query_marker(&self, aria_ref: &str) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|&n| self.attribute(n, MARKER_ATTRIBUTE) == Some(aria_ref))
            .collect()
    }

    /// Every marker currently set, in arena order.
    pub fn markers(&self) -> Vec<(NodeId, String)> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter_map(|n| {
                self.attribute(n, MARKER_ATTRIBUTE)
                    .map(|value| (n, value.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;
