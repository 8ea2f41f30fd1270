//! Accessible name computation.
//!
//! Precedence: `aria-labelledby`, `aria-label`, native labelling (label
//! elements, `alt`, button values, captions), content for roles that allow
//! it, then `title` and `placeholder`.

use super::{NAME_FROM_CONTENT_ROLES, role_in};
use crate::dom::{Document, NodeId, NodeKind};
use crate::probe;

use super::html::input_type;

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(super) fn accessible_name(doc: &Document, el: NodeId, role: Option<&str>) -> String {
    if let Some(name) = labelled_by(doc, el) {
        return name;
    }
    if let Some(label) = non_blank(doc.attribute(el, "aria-label")) {
        return label;
    }
    if let Some(native) = native_name(doc, el) {
        return native;
    }
    if role.is_some_and(|r| role_in(r, NAME_FROM_CONTENT_ROLES)) {
        let content = content_text(doc, el);
        if !content.trim().is_empty() {
            return content;
        }
    }
    if let Some(title) = non_blank(doc.attribute(el, "title")) {
        return title;
    }
    non_blank(doc.attribute(el, "placeholder")).unwrap_or_default()
}

fn labelled_by(doc: &Document, el: NodeId) -> Option<String> {
    let ids = doc.attribute(el, "aria-labelledby")?;
    let parts: Vec<String> = ids
        .split_whitespace()
        .filter_map(|id| doc.element_by_id(el, id))
        .map(|target| {
            non_blank(doc.attribute(target, "aria-label"))
                .unwrap_or_else(|| content_text(doc, target))
        })
        .filter(|text| !text.trim().is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn native_name(doc: &Document, el: NodeId) -> Option<String> {
    match doc.tag(el)? {
        "input" => {
            let ty = input_type(doc, el);
            match ty.as_str() {
                "button" | "submit" | "reset" => {
                    let value = non_blank(doc.attribute(el, "value"));
                    value.or_else(|| match ty.as_str() {
                        "submit" => Some("Submit".to_string()),
                        "reset" => Some("Reset".to_string()),
                        _ => None,
                    })
                }
                "image" => non_blank(doc.attribute(el, "alt"))
                    .or_else(|| non_blank(doc.attribute(el, "value")))
                    .or_else(|| Some("Submit".to_string())),
                _ => label_text(doc, el),
            }
        }
        "textarea" | "select" | "meter" | "progress" | "output" => label_text(doc, el),
        "button" => label_text(doc, el),
        "img" | "area" => non_blank(doc.attribute(el, "alt")),
        "fieldset" => child_text(doc, el, "legend"),
        "figure" => child_text(doc, el, "figcaption"),
        "table" => child_text(doc, el, "caption"),
        _ => None,
    }
}

fn child_text(doc: &Document, el: NodeId, tag: &str) -> Option<String> {
    doc.children(el)
        .iter()
        .find(|&&c| doc.tag(c) == Some(tag))
        .map(|&c| content_text(doc, c))
        .filter(|t| !t.trim().is_empty())
}

/// Text of associated `<label>` elements: `label[for=id]` and a wrapping label.
fn label_text(doc: &Document, el: NodeId) -> Option<String> {
    let mut labels = Vec::new();
    if let Some(id) = doc.attribute(el, "id").filter(|id| !id.is_empty()) {
        let root = doc.tree_root(el);
        for n in doc.descendants(root) {
            if doc.tag(n) == Some("label") && doc.attribute(n, "for") == Some(id) {
                labels.push(n);
            }
        }
    }
    if let Some(wrapping) = doc.self_and_ancestors(el).skip(1).find(|&n| doc.tag(n) == Some("label")) {
        if !labels.contains(&wrapping) {
            labels.push(wrapping);
        }
    }
    let parts: Vec<String> = labels
        .into_iter()
        .map(|label| content_text(doc, label))
        .filter(|t| !t.trim().is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Name-from-content text: visible descendant text, embedded names of labelled
/// children, `alt` of images, and pseudo-element content. Block children are
/// separated by spaces.
pub(crate) fn content_text(doc: &Document, el: NodeId) -> String {
    let mut out = String::new();
    collect_content(doc, el, &mut out, true);
    out
}

fn collect_content(doc: &Document, el: NodeId, out: &mut String, is_root: bool) {
    if !is_root {
        if probe::is_hidden_for_aria(doc, el) {
            return;
        }
        if let Some(label) = non_blank(doc.attribute(el, "aria-label")) {
            push_spaced(out, &label);
            return;
        }
        if matches!(doc.tag(el), Some("img" | "area")) {
            if let Some(alt) = non_blank(doc.attribute(el, "alt")) {
                push_spaced(out, &alt);
            }
            return;
        }
    }

    let block = !is_root && probe::is_block(doc, el);
    if block {
        out.push(' ');
    }
    let style = doc.element(el).map(|d| d.style.clone()).unwrap_or_default();
    if let Some(before) = style.before_content.as_deref().and_then(crate::builder::pseudo_text) {
        out.push_str(&before);
    }

    let mut children: Vec<NodeId> = match doc.element(el) {
        Some(data) if data.tag == "slot" && !data.assigned_nodes.is_empty() => data.assigned_nodes.clone(),
        _ => doc
            .children(el)
            .iter()
            .copied()
            .filter(|&c| !doc.node(c).slotted)
            .collect(),
    };
    if let Some(shadow) = doc.element(el).and_then(|d| d.shadow_root) {
        children.extend(doc.children(shadow).iter().copied());
    }

    for child in children {
        match &doc.node(child).kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) => collect_content(doc, child, out, false),
            NodeKind::Fragment => {}
        }
    }

    if let Some(after) = style.after_content.as_deref().and_then(crate::builder::pseudo_text) {
        out.push_str(&after);
    }
    if block {
        out.push(' ');
    }
}

fn push_spaced(out: &mut String, text: &str) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
    out.push_str(text);
}
