//! DOM to accessibility tree.
//!
//! The builder walks the composed tree (light children, shadow roots and
//! slot assignments), skips elements hidden from assistive technology, and
//! hands out a ref to every node that is visible and reachable by pointer.
//! Each ref is written onto its element as a [`MARKER_ATTRIBUTE`] so the
//! element can be found again when an action names the ref.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::dom::{Document, FrameContent, MARKER_ATTRIBUTE, NodeId, NodeKind};
use crate::normalize::normalize_whitespace;
use crate::probe;
use crate::roles::{
    CHECKED_ROLES, DISABLED_ROLES, EXPANDED_ROLES, LEVEL_ROLES, PRESSED_ROLES, RoleResolver,
    SELECTED_ROLES, role_in,
};
use crate::tree::{AriaChild, AriaNode, RefCounter};

/// Same-origin frames nested deeper than this are rendered as placeholders.
pub const DEFAULT_MAX_IFRAME_DEPTH: usize = 5;

/// Block-level separator pushed around block content.
const BLOCK_SEPARATOR: &str = " ";

const SENSITIVE_INPUT_TYPES: &[&str] = &["password", "checkbox", "radio", "file"];

const SENSITIVE_AUTOCOMPLETE: &[&str] = &[
    "cc-number",
    "cc-csc",
    "cc-exp",
    "cc-exp-month",
    "cc-exp-year",
    "current-password",
    "new-password",
    "one-time-code",
];

static CSS_STRING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).ok());

/// Text of a computed `content` value such as `"→"` or `"a" "b"`, with CSS
/// escapes removed. `None` for keywords, counters and `attr()`.
pub(crate) fn pseudo_text(content: &str) -> Option<String> {
    let content = content.trim();
    if !content.starts_with('"') {
        return None;
    }
    let text: String = CSS_STRING
        .as_ref()?
        .captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| unescape_css(m.as_str()))
        .collect();
    Some(text).filter(|s| !s.is_empty())
}

fn unescape_css(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

/// Whether an input or textarea value must never appear in a snapshot.
pub fn is_sensitive_input(doc: &Document, el: NodeId) -> bool {
    let ty = doc
        .attribute(el, "type")
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_default();
    if SENSITIVE_INPUT_TYPES.contains(&ty.as_str()) {
        return true;
    }
    doc.attribute(el, "autocomplete").is_some_and(|ac| {
        ac.split_whitespace()
            .any(|token| SENSITIVE_AUTOCOMPLETE.contains(&token.to_ascii_lowercase().as_str()))
    })
}

/// Builds an [`AriaNode`] tree from a [`Document`].
pub struct SnapshotBuilder<'r, R: RoleResolver + ?Sized> {
    resolver: &'r R,
    max_iframe_depth: usize,
}

impl<'r, R: RoleResolver + ?Sized> SnapshotBuilder<'r, R> {
    pub fn new(resolver: &'r R) -> Self {
        Self {
            resolver,
            max_iframe_depth: DEFAULT_MAX_IFRAME_DEPTH,
        }
    }

    pub fn with_max_iframe_depth(mut self, depth: usize) -> Self {
        self.max_iframe_depth = depth;
        self
    }

    /// Build the tree for `root` with a fresh ref counter.
    pub fn build(&self, doc: &mut Document, root: NodeId) -> (AriaNode, RefCounter) {
        let mut counter = RefCounter::new();
        let tree = self.build_with_counter(doc, root, &mut counter);
        (tree, counter)
    }

    /// Build the tree for `root`, drawing refs from `counter`.
    pub fn build_with_counter(&self, doc: &mut Document, root: NodeId, counter: &mut RefCounter) -> AriaNode {
        self.build_at_depth(doc, root, counter, 0)
    }

    fn build_at_depth(
        &self,
        doc: &mut Document,
        root: NodeId,
        counter: &mut RefCounter,
        depth: usize,
    ) -> AriaNode {
        doc.strip_markers(root);

        let mut fragment = AriaNode::fragment();
        fragment.element_box = Some(probe::compute_box(doc, root));

        let mut walk = Walk {
            builder: self,
            doc,
            counter,
            depth,
            visited: HashSet::new(),
        };
        walk.visited.insert(root);
        let owned = walk.owned_elements(root);
        walk.process_element(&mut fragment, root, owned);

        debug!(depth, refs = walk.counter.count(), "built accessibility tree");
        fragment
    }
}

struct Walk<'a, 'b, 'r, R: RoleResolver + ?Sized> {
    builder: &'b SnapshotBuilder<'r, R>,
    doc: &'a mut Document,
    counter: &'a mut RefCounter,
    depth: usize,
    visited: HashSet<NodeId>,
}

impl<R: RoleResolver + ?Sized> Walk<'_, '_, '_, R> {
    fn visit(&mut self, parent: &mut AriaNode, node: NodeId) {
        if !self.visited.insert(node) {
            return;
        }

        let el = match &self.doc.node(node).kind {
            NodeKind::Text(text) => {
                if parent.role != "textbox" && !text.is_empty() {
                    parent.children.push(AriaChild::Text(text.clone()));
                }
                return;
            }
            NodeKind::Fragment => {
                let children = self.doc.children(node).to_vec();
                for child in children {
                    self.visit(parent, child);
                }
                return;
            }
            NodeKind::Element(_) => node,
        };

        if probe::is_hidden_for_aria(self.doc, el) {
            trace!(node = el.index(), "skipping hidden element");
            return;
        }

        if self.doc.tag(el) == Some("iframe") {
            self.visit_frame(parent, el);
            return;
        }

        let owned = self.owned_elements(el);
        match self.to_aria_node(el) {
            Some(mut child) => {
                self.process_element(&mut child, el, owned);
                parent.children.push(AriaChild::Node(child));
            }
            None => self.process_element(parent, el, owned),
        }
    }

    /// Elements named by `aria-owns`, looked up in the element's document.
    fn owned_elements(&self, el: NodeId) -> Vec<NodeId> {
        let Some(ids) = self.doc.attribute(el, "aria-owns") else {
            return Vec::new();
        };
        ids.split_whitespace()
            .filter_map(|id| self.doc.element_by_id(el, id))
            .collect()
    }

    fn process_element(&mut self, node: &mut AriaNode, el: NodeId, owned: Vec<NodeId>) {
        let block = probe::is_block(self.doc, el);
        if block {
            node.children.push(AriaChild::Text(BLOCK_SEPARATOR.to_string()));
        }

        let (before, after) = match self.doc.element(el) {
            Some(data) => (
                data.style.before_content.as_deref().and_then(pseudo_text),
                data.style.after_content.as_deref().and_then(pseudo_text),
            ),
            None => (None, None),
        };
        if let Some(text) = before {
            node.children.push(AriaChild::Text(text));
        }

        let assigned = match self.doc.element(el) {
            Some(data) if data.tag == "slot" => data.assigned_nodes.clone(),
            _ => Vec::new(),
        };
        if !assigned.is_empty() {
            for child in assigned {
                self.visit(node, child);
            }
        } else {
            let children: Vec<NodeId> = self
                .doc
                .children(el)
                .iter()
                .copied()
                .filter(|&c| !self.doc.node(c).slotted)
                .collect();
            for child in children {
                self.visit(node, child);
            }
            if let Some(shadow) = self.doc.element(el).and_then(|d| d.shadow_root) {
                let shadow_children = self.doc.children(shadow).to_vec();
                for child in shadow_children {
                    self.visit(node, child);
                }
            }
        }

        for child in owned {
            self.visit(node, child);
        }

        if let Some(text) = after {
            node.children.push(AriaChild::Text(text));
        }
        if block {
            node.children.push(AriaChild::Text(BLOCK_SEPARATOR.to_string()));
        }
    }

    fn to_aria_node(&mut self, el: NodeId) -> Option<AriaNode> {
        let resolver = self.builder.resolver;
        let role = resolver
            .role(self.doc, el)
            .unwrap_or_else(|| "generic".to_string());
        if role == "presentation" || role == "none" {
            return None;
        }

        let name = normalize_whitespace(&resolver.accessible_name(self.doc, el));
        let element_box = probe::compute_box(self.doc, el);
        let mut node = AriaNode::new(role.as_str(), name);
        node.receives_pointer_events = resolver.receives_pointer_events(self.doc, el);
        node.element_box = Some(element_box);

        if node.is_pointer_target() {
            let aria_ref = self.counter.next_ref();
            self.doc.set_attribute(el, MARKER_ATTRIBUTE, &aria_ref);
            node.aria_ref = Some(aria_ref);
        }

        if role_in(&role, CHECKED_ROLES) {
            node.checked = Some(resolver.checked(self.doc, el));
        }
        if role_in(&role, DISABLED_ROLES) {
            node.disabled = Some(resolver.disabled(self.doc, el));
        }
        if role_in(&role, EXPANDED_ROLES) {
            node.expanded = resolver.expanded(self.doc, el);
        }
        if role_in(&role, LEVEL_ROLES) {
            node.level = resolver.level(self.doc, el);
        }
        if role_in(&role, PRESSED_ROLES) {
            node.pressed = Some(resolver.pressed(self.doc, el));
        }
        if role_in(&role, SELECTED_ROLES) {
            node.selected = Some(resolver.selected(self.doc, el));
        }

        match self.doc.tag(el) {
            Some("input") if !is_sensitive_input(self.doc, el) => {
                let value = self
                    .doc
                    .element(el)
                    .and_then(|d| d.value.clone())
                    .or_else(|| self.doc.attribute(el, "value").map(str::to_string));
                if let Some(value) = value {
                    node.children.push(AriaChild::Text(value));
                }
            }
            Some("textarea") if !is_sensitive_input(self.doc, el) => {
                let value = self
                    .doc
                    .element(el)
                    .and_then(|d| d.value.clone())
                    .unwrap_or_else(|| self.doc.text_content(el));
                node.children.push(AriaChild::Text(value));
            }
            _ => {}
        }

        if role == "link" || self.doc.tag(el) == Some("a") {
            if let Some(href) = self.doc.attribute(el, "href") {
                node.props.insert("url".to_string(), href.to_string());
            }
        }

        Some(node)
    }

    fn visit_frame(&mut self, parent: &mut AriaNode, iframe: NodeId) {
        let frame = self.doc.element(iframe).and_then(|d| d.frame);
        match frame {
            Some(FrameContent::SameOrigin(body)) if self.depth < self.builder.max_iframe_depth => {
                let subtree = self
                    .builder
                    .build_at_depth(self.doc, body, self.counter, self.depth + 1);
                parent.children.extend(subtree.children);
            }
            _ => {
                trace!(node = iframe.index(), depth = self.depth, "iframe placeholder");
                let mut placeholder = AriaNode::new("iframe", "");
                placeholder.element_box = Some(probe::compute_box(self.doc, iframe));
                placeholder.receives_pointer_events =
                    self.builder.resolver.receives_pointer_events(self.doc, iframe);
                if placeholder.is_pointer_target() {
                    let aria_ref = self.counter.next_ref();
                    self.doc.set_attribute(iframe, MARKER_ATTRIBUTE, &aria_ref);
                    placeholder.aria_ref = Some(aria_ref);
                }
                parent.children.push(AriaChild::Node(placeholder));
            }
        }
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
