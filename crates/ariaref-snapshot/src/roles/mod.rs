//! Role, accessible-name and state resolution.
//!
//! [`RoleResolver`] is the seam between the tree builder and ARIA
//! semantics. [`HtmlRoleResolver`] computes them from HTML and ARIA
//! attributes plus captured live state.

mod html;
mod name;

pub use html::HtmlRoleResolver;

use serde::{Deserialize, Serialize};

use crate::dom::{Document, NodeId};

/// ARIA tri-state value used by `checked` and `pressed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    True,
    False,
    Mixed,
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { TriState::True } else { TriState::False }
    }
}

/// ARIA semantics for one element.
pub trait RoleResolver: Send + Sync {
    /// Explicit or implicit role. `None` when the element has no role.
    fn role(&self, doc: &Document, el: NodeId) -> Option<String>;

    /// Accessible name, not yet whitespace-normalized.
    fn accessible_name(&self, doc: &Document, el: NodeId) -> String;

    fn checked(&self, doc: &Document, el: NodeId) -> TriState;

    fn disabled(&self, doc: &Document, el: NodeId) -> bool;

    fn expanded(&self, doc: &Document, el: NodeId) -> Option<bool>;

    fn level(&self, doc: &Document, el: NodeId) -> Option<u32>;

    fn pressed(&self, doc: &Document, el: NodeId) -> TriState;

    fn selected(&self, doc: &Document, el: NodeId) -> bool;

    /// Whether pointer input can reach the element.
    fn receives_pointer_events(&self, doc: &Document, el: NodeId) -> bool;
}

/// Roles carrying a `checked` state.
pub const CHECKED_ROLES: &[&str] = &[
    "checkbox",
    "menuitemcheckbox",
    "option",
    "radio",
    "switch",
    "menuitemradio",
    "treeitem",
];

/// Roles supporting `aria-disabled`.
pub const DISABLED_ROLES: &[&str] = &[
    "application",
    "button",
    "composite",
    "gridcell",
    "group",
    "input",
    "link",
    "menuitem",
    "scrollbar",
    "separator",
    "tab",
    "checkbox",
    "columnheader",
    "combobox",
    "grid",
    "listbox",
    "menu",
    "menubar",
    "menuitemcheckbox",
    "menuitemradio",
    "option",
    "radio",
    "radiogroup",
    "row",
    "rowheader",
    "searchbox",
    "select",
    "slider",
    "spinbutton",
    "switch",
    "tablist",
    "textbox",
    "toolbar",
    "tree",
    "treegrid",
    "treeitem",
];

/// Roles supporting `aria-expanded`.
pub const EXPANDED_ROLES: &[&str] = &[
    "application",
    "button",
    "checkbox",
    "combobox",
    "gridcell",
    "link",
    "listbox",
    "menuitem",
    "row",
    "rowheader",
    "tab",
    "treeitem",
    "columnheader",
    "menuitemcheckbox",
    "menuitemradio",
    "switch",
];

/// Roles carrying a heading-style `level`.
pub const LEVEL_ROLES: &[&str] = &["heading", "listitem", "row", "treeitem"];

/// Roles carrying a `pressed` state.
pub const PRESSED_ROLES: &[&str] = &["button"];

/// Roles carrying a `selected` state.
pub const SELECTED_ROLES: &[&str] = &[
    "gridcell",
    "option",
    "row",
    "tab",
    "rowheader",
    "columnheader",
    "treeitem",
];

/// Roles whose name may be computed from their content.
pub(crate) const NAME_FROM_CONTENT_ROLES: &[&str] = &[
    "button",
    "cell",
    "checkbox",
    "columnheader",
    "gridcell",
    "heading",
    "link",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "option",
    "radio",
    "row",
    "rowheader",
    "switch",
    "tab",
    "tooltip",
    "treeitem",
];

/// Every role token accepted from a `role` attribute.
pub(crate) const VALID_ROLES: &[&str] = &[
    "alert", "alertdialog", "application", "article", "banner", "blockquote", "button",
    "caption", "cell", "checkbox", "code", "columnheader", "combobox", "complementary",
    "contentinfo", "definition", "deletion", "dialog", "directory", "document", "emphasis",
    "feed", "figure", "form", "generic", "grid", "gridcell", "group", "heading", "img",
    "insertion", "link", "list", "listbox", "listitem", "log", "main", "mark", "marquee",
    "math", "meter", "menu", "menubar", "menuitem", "menuitemcheckbox", "menuitemradio",
    "navigation", "none", "note", "option", "paragraph", "presentation", "progressbar",
    "radio", "radiogroup", "region", "row", "rowgroup", "rowheader", "scrollbar", "search",
    "searchbox", "separator", "slider", "spinbutton", "status", "strong", "subscript",
    "superscript", "switch", "tab", "table", "tablist", "tabpanel", "term", "textbox", "time",
    "timer", "toolbar", "tooltip", "tree", "treegrid", "treeitem",
];

pub(crate) fn role_in(role: &str, list: &[&str]) -> bool {
    list.contains(&role)
}
