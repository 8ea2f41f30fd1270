//! Visibility and style probing.
//!
//! Works on captured computed style; properties that were not captured fall
//! back to CSS initial values, or to the tag's user-agent default for
//! `display`.

use crate::dom::{Document, NodeId, NodeKind, Rect};

/// Effective style values after inheritance.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: f64,
    pub cursor: Option<String>,
    pub pointer_events: String,
}

/// Layout and visibility of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBox {
    pub visible: bool,
    pub rect: Option<Rect>,
    pub style: Option<BoxStyle>,
    /// Whether the rect overlaps the captured viewport. `true` when either is unknown.
    pub in_viewport: bool,
}

impl ElementBox {
    pub fn cursor(&self) -> Option<&str> {
        self.style.as_ref().and_then(|s| s.cursor.as_deref())
    }
}

const HIDDEN_TAGS: &[&str] = &[
    "head", "link", "meta", "noscript", "script", "style", "template", "title",
];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "center", "dd", "details", "dialog",
    "dir", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "html", "legend", "main", "menu", "nav",
    "ol", "optgroup", "option", "p", "pre", "search", "section", "summary", "ul",
];

const INLINE_BLOCK_TAGS: &[&str] = &[
    "button", "iframe", "img", "input", "meter", "progress", "select", "textarea", "video",
];

fn default_display(tag: &str) -> &'static str {
    match tag {
        "li" => "list-item",
        "table" => "table",
        "caption" => "table-caption",
        "thead" => "table-header-group",
        "tbody" => "table-row-group",
        "tfoot" => "table-footer-group",
        "tr" => "table-row",
        "td" | "th" => "table-cell",
        "col" => "table-column",
        "colgroup" => "table-column-group",
        "slot" => "contents",
        t if HIDDEN_TAGS.contains(&t) => "none",
        t if BLOCK_TAGS.contains(&t) => "block",
        t if INLINE_BLOCK_TAGS.contains(&t) => "inline-block",
        _ => "inline",
    }
}

/// Computed `display`, or the tag default. The `hidden` attribute maps to `none`.
pub fn effective_display(doc: &Document, el: NodeId) -> String {
    let Some(data) = doc.element(el) else {
        return "inline".to_string();
    };
    if let Some(display) = &data.style.display {
        return display.trim().to_ascii_lowercase();
    }
    let hidden_input = data.tag == "input"
        && data
            .attribute("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("hidden"));
    if data.attribute("hidden").is_some() || hidden_input {
        return "none".to_string();
    }
    default_display(&data.tag).to_string()
}

/// Whether text around this element should be separated from its neighbours.
pub fn is_block(doc: &Document, el: NodeId) -> bool {
    doc.tag(el) == Some("br") || effective_display(doc, el) != "inline"
}

fn inherited(doc: &Document, el: NodeId, pick: impl Fn(&crate::dom::Style) -> Option<&String>) -> Option<String> {
    doc.self_and_ancestors(el)
        .filter_map(|n| doc.element(n))
        .find_map(|data| pick(&data.style).map(|v| v.trim().to_ascii_lowercase()))
}

/// Effective `visibility`, inherited from the nearest ancestor that sets it.
pub fn effective_visibility(doc: &Document, el: NodeId) -> String {
    inherited(doc, el, |s| s.visibility.as_ref()).unwrap_or_else(|| "visible".to_string())
}

/// Effective `pointer-events`, inherited.
pub fn effective_pointer_events(doc: &Document, el: NodeId) -> String {
    inherited(doc, el, |s| s.pointer_events.as_ref()).unwrap_or_else(|| "auto".to_string())
}

/// Effective `cursor`, inherited. `None` when nothing on the chain sets it.
pub fn effective_cursor(doc: &Document, el: NodeId) -> Option<String> {
    inherited(doc, el, |s| s.cursor.as_ref())
}

fn display_none_in_chain(doc: &Document, el: NodeId) -> bool {
    doc.self_and_ancestors(el)
        .any(|n| doc.node(n).is_element() && effective_display(doc, n) == "none")
}

fn transparent_in_chain(doc: &Document, el: NodeId) -> bool {
    doc.self_and_ancestors(el)
        .filter_map(|n| doc.element(n))
        .any(|data| data.style.opacity.is_some_and(|o| o <= 0.0))
}

fn is_visibility_hidden(visibility: &str) -> bool {
    visibility == "hidden" || visibility == "collapse"
}

/// Whether the element is excluded from the accessibility tree: non-rendered
/// tags, `aria-hidden="true"` on the element or an ancestor, `display: none`
/// in the chain, or hidden visibility.
pub fn is_hidden_for_aria(doc: &Document, el: NodeId) -> bool {
    let Some(data) = doc.element(el) else {
        return false;
    };
    if HIDDEN_TAGS.contains(&data.tag.as_str()) {
        return true;
    }
    let aria_hidden = doc.self_and_ancestors(el).any(|n| {
        doc.attribute(n, "aria-hidden")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    });
    if aria_hidden || display_none_in_chain(doc, el) {
        return true;
    }
    is_visibility_hidden(&effective_visibility(doc, el))
}

/// Compute visibility, rect and effective style of an element.
pub fn compute_box(doc: &Document, el: NodeId) -> ElementBox {
    let Some(data) = doc.element(el) else {
        return ElementBox {
            visible: false,
            rect: None,
            style: None,
            in_viewport: false,
        };
    };

    let style = BoxStyle {
        display: effective_display(doc, el),
        visibility: effective_visibility(doc, el),
        opacity: data.style.opacity.unwrap_or(1.0),
        cursor: effective_cursor(doc, el),
        pointer_events: effective_pointer_events(doc, el),
    };

    if style.display == "contents" {
        let visible = doc.children(el).iter().any(|&child| match &doc.node(child).kind {
            NodeKind::Element(_) => compute_box(doc, child).visible,
            NodeKind::Text(text) => !text.trim().is_empty() && !display_none_in_chain(doc, el),
            NodeKind::Fragment => false,
        });
        return ElementBox {
            visible,
            rect: None,
            style: Some(style),
            in_viewport: true,
        };
    }

    let rect = data.rect;
    let visible = !display_none_in_chain(doc, el)
        && !is_visibility_hidden(&style.visibility)
        && !transparent_in_chain(doc, el)
        && rect.is_none_or(|r| r.has_area());
    let in_viewport = match (rect, doc.viewport()) {
        (Some(r), Some(viewport)) => r.intersects(&viewport),
        _ => true,
    };

    ElementBox {
        visible,
        rect,
        style: Some(style),
        in_viewport,
    }
}
