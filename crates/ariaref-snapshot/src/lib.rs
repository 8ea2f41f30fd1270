//! # ariaref Snapshot
//!
//! Builds a compact accessibility snapshot of a page document, tags every
//! visible, pointer-reachable element with a short ref (`E1`, `E2`, ...), and
//! renders it as indented YAML-like text. Also hosts the text-only pre-flight
//! validator that checks proposed actions against that text.
//!
//! Pipeline: [`SnapshotBuilder`] → [`normalize`] → [`Renderer`].

pub mod builder;
pub mod dom;
pub mod normalize;
pub mod preflight;
pub mod probe;
pub mod render;
pub mod roles;
pub mod tree;
pub mod yaml;

use ariaref_config::SnapshotConfig;

pub use builder::{DEFAULT_MAX_IFRAME_DEPTH, SnapshotBuilder, is_sensitive_input};
pub use dom::{CaptureError, Document, MARKER_ATTRIBUTE, MarkerWrite, NodeId};
pub use normalize::normalize;
pub use preflight::{PreflightValidator, check_action};
pub use probe::{BoxStyle, ElementBox};
pub use render::{DEFAULT_MAX_NAME_LENGTH, Renderer, render};
pub use roles::{HtmlRoleResolver, RoleResolver, TriState};
pub use tree::{AriaChild, AriaNode, RefCounter};

/// Rendered snapshot text and the number of refs it hands out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSnapshot {
    pub text: String,
    pub ref_count: u32,
}

/// Build, normalize and render in one call.
pub struct AriaSnapshotter<R: RoleResolver = HtmlRoleResolver> {
    resolver: R,
    max_iframe_depth: usize,
    max_name_length: usize,
}

impl Default for AriaSnapshotter {
    fn default() -> Self {
        Self::new(HtmlRoleResolver::new())
    }
}

impl From<&SnapshotConfig> for AriaSnapshotter {
    fn from(config: &SnapshotConfig) -> Self {
        Self::default()
            .with_max_iframe_depth(config.max_iframe_depth)
            .with_max_name_length(config.max_name_length)
    }
}

impl<R: RoleResolver> AriaSnapshotter<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            max_iframe_depth: DEFAULT_MAX_IFRAME_DEPTH,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }

    pub fn with_max_iframe_depth(mut self, depth: usize) -> Self {
        self.max_iframe_depth = depth;
        self
    }

    pub fn with_max_name_length(mut self, max: usize) -> Self {
        self.max_name_length = max;
        self
    }

    /// Build the normalized tree for the document root. Markers on `doc` are
    /// rewritten; refs start at `E1`.
    pub fn tree(&self, doc: &mut Document) -> (AriaNode, u32) {
        let root = doc.root();
        let (mut tree, counter) = SnapshotBuilder::new(&self.resolver)
            .with_max_iframe_depth(self.max_iframe_depth)
            .build(doc, root);
        normalize(&mut tree);
        (tree, counter.count())
    }

    /// Snapshot the document root as text.
    pub fn snapshot(&self, doc: &mut Document) -> RenderedSnapshot {
        let (tree, ref_count) = self.tree(doc);
        let text = Renderer::new()
            .with_max_name_length(self.max_name_length)
            .render(&tree);
        tracing::debug!(ref_count, bytes = text.len(), "rendered snapshot");
        RenderedSnapshot { text, ref_count }
    }
}
