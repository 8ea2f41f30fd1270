//! HTML-AAM role mapping and ARIA states.

use super::{RoleResolver, TriState, VALID_ROLES, name};
use crate::dom::{Document, NodeId};
use crate::probe;

/// Resolves roles, names and states from HTML semantics and ARIA attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRoleResolver;

impl HtmlRoleResolver {
    pub fn new() -> Self {
        Self
    }
}

const DISABLEABLE_TAGS: &[&str] = &[
    "button", "fieldset", "input", "optgroup", "option", "select", "textarea",
];

const LANDMARK_SCOPES: &[&str] = &["article", "aside", "main", "nav", "section"];

pub(crate) fn input_type(doc: &Document, el: NodeId) -> String {
    doc.attribute(el, "type")
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_else(|| "text".to_string())
}

fn attr_is_true(doc: &Document, el: NodeId, name: &str) -> bool {
    doc.attribute(el, name)
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

fn is_natively_focusable(doc: &Document, el: NodeId) -> bool {
    match doc.tag(el) {
        Some("button" | "select" | "textarea") => true,
        Some("input") => input_type(doc, el) != "hidden",
        Some("a" | "area") => doc.has_attribute(el, "href"),
        _ => doc.has_attribute(el, "tabindex"),
    }
}

fn explicit_role(doc: &Document, el: NodeId) -> Option<String> {
    let value = doc.attribute(el, "role")?;
    value
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .find(|token| VALID_ROLES.contains(&token.as_str()))
}

fn inside_landmark_scope(doc: &Document, el: NodeId) -> bool {
    doc.self_and_ancestors(el)
        .skip(1)
        .any(|n| doc.tag(n).is_some_and(|t| LANDMARK_SCOPES.contains(&t)))
}

fn implicit_input_role(doc: &Document, el: NodeId) -> Option<&'static str> {
    let has_list = doc.has_attribute(el, "list");
    match input_type(doc, el).as_str() {
        "button" | "image" | "reset" | "submit" | "file" => Some("button"),
        "checkbox" => Some("checkbox"),
        "radio" => Some("radio"),
        "range" => Some("slider"),
        "number" => Some("spinbutton"),
        "hidden" => None,
        "search" if has_list => Some("combobox"),
        "search" => Some("searchbox"),
        "email" | "tel" | "text" | "url" | "" if has_list => Some("combobox"),
        _ => Some("textbox"),
    }
}

fn implicit_role(doc: &Document, el: NodeId) -> Option<&'static str> {
    let tag = doc.tag(el)?;
    let role = match tag {
        "a" | "area" if doc.has_attribute(el, "href") => "link",
        "article" => "article",
        "aside" => "complementary",
        "blockquote" => "blockquote",
        "button" => "button",
        "caption" => "caption",
        "code" => "code",
        "datalist" => "listbox",
        "dd" => "definition",
        "del" | "s" => "deletion",
        "details" | "fieldset" | "optgroup" => "group",
        "dfn" | "dt" => "term",
        "dialog" => "dialog",
        "em" => "emphasis",
        "figure" => "figure",
        "footer" if !inside_landmark_scope(doc, el) => "contentinfo",
        "form" => "form",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
        "header" if !inside_landmark_scope(doc, el) => "banner",
        "hr" => "separator",
        "html" => "document",
        "img" => {
            let empty_alt = doc.attribute(el, "alt") == Some("");
            if empty_alt && !doc.has_attribute(el, "title") {
                "presentation"
            } else {
                "img"
            }
        }
        "input" => return implicit_input_role(doc, el),
        "ins" => "insertion",
        "li" => "listitem",
        "main" => "main",
        "mark" => "mark",
        "math" => "math",
        "menu" | "ol" | "ul" => "list",
        "meter" => "meter",
        "nav" => "navigation",
        "option" => "option",
        "output" => "status",
        "p" => "paragraph",
        "progress" => "progressbar",
        "search" => "search",
        "section"
            if doc.has_attribute(el, "aria-label")
                || doc.has_attribute(el, "aria-labelledby")
                || doc.has_attribute(el, "title") =>
        {
            "region"
        }
        // Slots are transparent; their assigned nodes render in place.
        "slot" => "none",
        "select" => {
            let size = doc
                .attribute(el, "size")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .unwrap_or(0);
            if doc.has_attribute(el, "multiple") || size > 1 {
                "listbox"
            } else {
                "combobox"
            }
        }
        "strong" => "strong",
        "sub" => "subscript",
        "sup" => "superscript",
        "svg" => "img",
        "table" => "table",
        "tbody" | "tfoot" | "thead" => "rowgroup",
        "td" => {
            let in_grid = doc
                .closest(el, "table")
                .and_then(|t| explicit_role(doc, t))
                .is_some_and(|r| r == "grid" || r == "treegrid");
            if in_grid { "gridcell" } else { "cell" }
        }
        "textarea" => "textbox",
        "th" => {
            if doc.attribute(el, "scope").is_some_and(|s| s.eq_ignore_ascii_case("row")) {
                "rowheader"
            } else {
                "columnheader"
            }
        }
        "time" => "time",
        "tr" => "row",
        _ => return None,
    };
    Some(role)
}

fn tri_state(value: Option<&str>) -> TriState {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("true") => TriState::True,
        Some("mixed") => TriState::Mixed,
        _ => TriState::False,
    }
}

fn in_disabled_fieldset(doc: &Document, el: NodeId) -> bool {
    doc.self_and_ancestors(el).skip(1).any(|n| {
        if doc.tag(n) != Some("fieldset") || !doc.has_attribute(n, "disabled") {
            return false;
        }
        // Controls in the fieldset's first legend stay enabled.
        let first_legend = doc
            .children(n)
            .iter()
            .copied()
            .find(|&c| doc.tag(c) == Some("legend"));
        match first_legend {
            Some(legend) => !doc.self_and_ancestors(el).any(|a| a == legend),
            None => true,
        }
    })
}

impl RoleResolver for HtmlRoleResolver {
    fn role(&self, doc: &Document, el: NodeId) -> Option<String> {
        let implicit = implicit_role(doc, el);
        match explicit_role(doc, el) {
            // Presentational roles are ignored on focusable elements.
            Some(role) if (role == "none" || role == "presentation") && is_natively_focusable(doc, el) => {
                implicit.map(str::to_string)
            }
            Some(role) => Some(role),
            None => implicit.map(str::to_string),
        }
    }

    fn accessible_name(&self, doc: &Document, el: NodeId) -> String {
        let role = self.role(doc, el);
        name::accessible_name(doc, el, role.as_deref())
    }

    fn checked(&self, doc: &Document, el: NodeId) -> TriState {
        if doc.tag(el) == Some("input") {
            let ty = input_type(doc, el);
            if ty == "checkbox" || ty == "radio" {
                let data = doc.element(el);
                if ty == "checkbox" && data.is_some_and(|d| d.indeterminate) {
                    return TriState::Mixed;
                }
                let checked = data
                    .and_then(|d| d.checked)
                    .unwrap_or_else(|| doc.has_attribute(el, "checked"));
                return checked.into();
            }
        }
        tri_state(doc.attribute(el, "aria-checked"))
    }

    fn disabled(&self, doc: &Document, el: NodeId) -> bool {
        if let Some(tag) = doc.tag(el) {
            if DISABLEABLE_TAGS.contains(&tag) {
                if doc.has_attribute(el, "disabled") {
                    return true;
                }
                if tag == "option" {
                    let parent_disabled = doc
                        .composed_parent(el)
                        .is_some_and(|p| doc.tag(p) == Some("optgroup") && doc.has_attribute(p, "disabled"));
                    if parent_disabled {
                        return true;
                    }
                }
                if in_disabled_fieldset(doc, el) {
                    return true;
                }
            }
        }
        doc.self_and_ancestors(el)
            .any(|n| attr_is_true(doc, n, "aria-disabled"))
    }

    fn expanded(&self, doc: &Document, el: NodeId) -> Option<bool> {
        match doc.attribute(el, "aria-expanded")?.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn level(&self, doc: &Document, el: NodeId) -> Option<u32> {
        if let Some(level) = doc
            .attribute(el, "aria-level")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&l| l > 0)
        {
            return Some(level);
        }
        match doc.tag(el)? {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }

    fn pressed(&self, doc: &Document, el: NodeId) -> TriState {
        tri_state(doc.attribute(el, "aria-pressed"))
    }

    fn selected(&self, doc: &Document, el: NodeId) -> bool {
        if doc.tag(el) == Some("option") {
            return doc
                .element(el)
                .and_then(|d| d.selected)
                .unwrap_or_else(|| doc.has_attribute(el, "selected"));
        }
        attr_is_true(doc, el, "aria-selected")
    }

    fn receives_pointer_events(&self, doc: &Document, el: NodeId) -> bool {
        probe::effective_pointer_events(doc, el) != "none"
    }
}

#[cfg(test)]
#[path = "roles_tests.rs"]
mod tests;
