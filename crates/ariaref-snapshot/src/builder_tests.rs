use super::*;
use crate::dom::{Document, Rect};
use crate::roles::HtmlRoleResolver;
use crate::AriaSnapshotter;

fn snapshot(doc: &mut Document) -> String {
    AriaSnapshotter::default().snapshot(doc).text
}

fn lines(expected: &[&str]) -> String {
    expected.join("\n")
}

#[test]
fn test_single_button_gets_first_ref() {
    let mut doc = Document::new("body");
    let button = doc.append_element_with(doc.root(), "button", &[("id", "x")]);
    doc.append_text(button, "Save");

    assert_eq!(snapshot(&mut doc), "- button \"Save\" [ref=E1]");
    assert_eq!(doc.attribute(button, MARKER_ATTRIBUTE), Some("E1"));
}

#[test]
fn test_refs_follow_document_order() {
    let mut doc = Document::new("body");
    let root = doc.root();
    let h1 = doc.append_element(root, "h1");
    doc.append_text(h1, "Title");
    let link = doc.append_element_with(root, "a", &[("href", "/a")]);
    doc.append_text(link, "A");
    let button = doc.append_element(root, "button");
    doc.append_text(button, "B");

    assert_eq!(
        snapshot(&mut doc),
        lines(&[
            "- heading \"Title\" [level=1] [ref=E1]",
            "- link \"A\" [ref=E2]:",
            "  - /url: /a",
            "- button \"B\" [ref=E3]",
        ])
    );
}

#[test]
fn test_hidden_elements_are_skipped() {
    let mut doc = Document::new("body");
    let root = doc.root();
    let gone = doc.append_element(root, "div");
    doc.element_mut(gone).unwrap().style.display = Some("none".into());
    let inner = doc.append_element(gone, "button");
    doc.append_text(inner, "Hidden");
    let aria_hidden = doc.append_element_with(root, "button", &[("aria-hidden", "true")]);
    doc.append_text(aria_hidden, "Also hidden");
    doc.append_element(root, "script");
    let shown = doc.append_element(root, "button");
    doc.append_text(shown, "Shown");

    assert_eq!(snapshot(&mut doc), "- button \"Shown\" [ref=E1]");
    assert!(doc.attribute(inner, MARKER_ATTRIBUTE).is_none());
    assert!(doc.attribute(aria_hidden, MARKER_ATTRIBUTE).is_none());
}

#[test]
fn test_generic_wrapper_collapses_but_consumes_ref() {
    let mut doc = Document::new("body");
    let div = doc.append_element(doc.root(), "div");
    let button = doc.append_element(div, "button");
    doc.append_text(button, "Go");

    assert_eq!(snapshot(&mut doc), "- button \"Go\" [ref=E2]");
}

#[test]
fn test_inline_text_and_generic() {
    let mut doc = Document::new("body");
    let p = doc.append_element(doc.root(), "p");
    doc.append_text(p, "Hello ");
    let b = doc.append_element(p, "b");
    doc.append_text(b, "world");

    assert_eq!(
        snapshot(&mut doc),
        lines(&[
            "- paragraph [ref=E1]:",
            "  - text: Hello",
            "  - generic [ref=E2]: world",
        ])
    );
}

#[test]
fn test_block_children_separate_words() {
    let mut doc = Document::new("body");
    let h2 = doc.append_element(doc.root(), "h2");
    let a = doc.append_element_with(h2, "span", &[("role", "none")]);
    doc.append_text(a, "Alpha");
    let b = doc.append_element_with(h2, "div", &[("role", "presentation")]);
    doc.append_text(b, "Beta");

    assert_eq!(snapshot(&mut doc), "- heading \"Alpha Beta\" [level=2] [ref=E1]");
}

#[test]
fn test_input_value_shown_unless_sensitive() {
    let mut doc = Document::new("body");
    let root = doc.root();
    let text = doc.append_element_with(root, "input", &[("type", "text"), ("value", "hello")]);
    doc.element_mut(text).unwrap().value = Some("typed".into());
    doc.append_element_with(root, "input", &[("type", "password"), ("value", "secret")]);
    doc.append_element_with(root, "input", &[("autocomplete", "cc-number"), ("value", "4111")]);

    let text = snapshot(&mut doc);
    assert_eq!(
        text,
        lines(&[
            "- textbox [ref=E1]: typed",
            "- textbox [ref=E2]",
            "- textbox [ref=E3]",
        ])
    );
    assert!(!text.contains("secret"));
    assert!(!text.contains("4111"));
}

#[test]
fn test_textarea_value_replaces_text_children() {
    let mut doc = Document::new("body");
    let area = doc.append_element_with(doc.root(), "textarea", &[("aria-label", "Notes")]);
    doc.append_text(area, "draft");

    assert_eq!(snapshot(&mut doc), "- textbox \"Notes\" [ref=E1]: draft");
}

#[test]
fn test_pointer_cursor_without_pointer_events_stays_inert() {
    let mut doc = Document::new("body");
    let root = doc.root();
    let menu = doc.append_element_with(root, "div", &[("role", "button")]);
    {
        let style = &mut doc.element_mut(menu).unwrap().style;
        style.cursor = Some("pointer".into());
        style.pointer_events = Some("none".into());
    }
    doc.append_text(menu, "Menu");

    let text = snapshot(&mut doc);
    assert_eq!(text, "- button \"Menu\"");
    assert!(!text.contains("cursor"));
}

#[test]
fn test_textarea_with_credential_autocomplete_is_redacted() {
    let mut doc = Document::new("body");
    let area = doc.append_element_with(
        doc.root(),
        "textarea",
        &[("aria-label", "Code"), ("autocomplete", "one-time-code")],
    );
    doc.element_mut(area).unwrap().value = Some("948213".into());

    let text = snapshot(&mut doc);
    assert_eq!(text, "- textbox \"Code\" [ref=E1]");
    assert!(!text.contains("948213"));
}

#[test]
fn test_anchor_with_button_role_keeps_url() {
    let mut doc = Document::new("body");
    let a = doc.append_element_with(doc.root(), "a", &[("href", "/settings"), ("role", "button")]);
    doc.append_text(a, "Settings");

    assert_eq!(
        snapshot(&mut doc),
        lines(&["- button \"Settings\" [ref=E1]:", "  - /url: /settings"])
    );
}

#[test]
fn test_checkbox_state() {
    let mut doc = Document::new("body");
    let label = doc.append_element(doc.root(), "label");
    let checkbox = doc.append_element_with(label, "input", &[("type", "checkbox"), ("value", "on")]);
    doc.element_mut(checkbox).unwrap().checked = Some(true);
    doc.append_text(label, "Remember me");

    assert_eq!(
        snapshot(&mut doc),
        lines(&[
            "- generic [ref=E1]:",
            "  - checkbox \"Remember me\" [checked] [ref=E2]",
            "  - text: Remember me",
        ])
    );
}

#[test]
fn test_pointer_events_none_gets_no_ref() {
    let mut doc = Document::new("body");
    let wrapper = doc.append_element(doc.root(), "div");
    doc.element_mut(wrapper).unwrap().style.pointer_events = Some("none".into());
    let button = doc.append_element(wrapper, "button");
    doc.append_text(button, "X");

    assert_eq!(snapshot(&mut doc), lines(&["- generic:", "  - button \"X\""]));
    assert!(doc.markers().is_empty());
}

#[test]
fn test_zero_size_element_listed_without_ref() {
    let mut doc = Document::new("body");
    let button = doc.append_element(doc.root(), "button");
    doc.element_mut(button).unwrap().rect = Some(Rect::new(0.0, 0.0, 0.0, 0.0));
    doc.append_text(button, "Z");

    assert_eq!(snapshot(&mut doc), "- button \"Z\"");
}

#[test]
fn test_cursor_pointer_annotation() {
    let mut doc = Document::new("body");
    let div = doc.append_element_with(doc.root(), "div", &[("role", "button")]);
    doc.element_mut(div).unwrap().style.cursor = Some("pointer".into());
    doc.append_text(div, "Menu");

    assert_eq!(snapshot(&mut doc), "- button \"Menu\" [ref=E1] [cursor=pointer]");
}

#[test]
fn test_same_origin_iframe_content_merged() {
    let mut doc = Document::new("body");
    let root = doc.root();
    let before = doc.append_element(root, "button");
    doc.append_text(before, "Outer");
    let iframe = doc.append_element(root, "iframe");
    let body = doc.attach_frame_document(iframe, "body");
    let inner = doc.append_element(body, "button");
    doc.append_text(inner, "Inner");

    assert_eq!(
        snapshot(&mut doc),
        lines(&["- button \"Outer\" [ref=E1]", "- button \"Inner\" [ref=E2]"])
    );
    assert_eq!(doc.query_marker("E2"), vec![inner]);
}

#[test]
fn test_cross_origin_iframe_is_placeholder() {
    let mut doc = Document::new("body");
    let iframe = doc.append_element(doc.root(), "iframe");
    doc.mark_cross_origin(iframe);

    assert_eq!(snapshot(&mut doc), "- iframe [ref=E1]");
}

#[test]
fn test_iframe_depth_limit() {
    let mut doc = Document::new("body");
    let outer = doc.append_element(doc.root(), "iframe");
    let body = doc.attach_frame_document(outer, "body");
    let nested = doc.append_element(body, "iframe");
    let deep_body = doc.attach_frame_document(nested, "body");
    let deep = doc.append_element(deep_body, "button");
    doc.append_text(deep, "Deep");

    let text = AriaSnapshotter::default()
        .with_max_iframe_depth(1)
        .snapshot(&mut doc)
        .text;
    assert_eq!(text, "- iframe [ref=E1]");
    assert_eq!(doc.query_marker("E1"), vec![nested]);

    let text = snapshot(&mut doc);
    assert_eq!(text, "- button \"Deep\" [ref=E1]");
    assert!(doc.attribute(nested, MARKER_ATTRIBUTE).is_none());
}

#[test]
fn test_nested_frame_markers_stripped_on_rebuild() {
    let mut doc = Document::new("body");
    let iframe = doc.append_element(doc.root(), "iframe");
    let body = doc.attach_frame_document(iframe, "body");
    let stale = doc.append_element_with(body, "span", &[(MARKER_ATTRIBUTE, "E9")]);
    doc.element_mut(stale).unwrap().style.display = Some("none".into());

    snapshot(&mut doc);
    assert!(doc.query_marker("E9").is_empty());
}

#[test]
fn test_shadow_dom_and_slots() {
    let mut doc = Document::new("body");
    let root = doc.root();
    let card = doc.append_element(root, "x-card");
    let shadow = doc.attach_shadow(card);
    let button = doc.append_element(shadow, "button");
    doc.append_text(button, "Shadow");

    let label = doc.append_element(root, "x-label");
    let light = doc.append_text(label, "Light");
    let shadow = doc.attach_shadow(label);
    let h3 = doc.append_element(shadow, "h3");
    let slot = doc.append_element(h3, "slot");
    doc.assign_to_slot(slot, light);

    assert_eq!(
        snapshot(&mut doc),
        lines(&[
            "- button \"Shadow\" [ref=E2]",
            "- heading \"Light\" [level=3] [ref=E4]",
        ])
    );
}

#[test]
fn test_aria_owns_reparents_once() {
    let mut doc = Document::new("body");
    let root = doc.root();
    doc.append_element_with(root, "div", &[("role", "listbox"), ("aria-owns", "opt")]);
    let option = doc.append_element_with(root, "div", &[("role", "option"), ("id", "opt")]);
    doc.append_text(option, "Owned");

    assert_eq!(
        snapshot(&mut doc),
        lines(&["- listbox [ref=E1]:", "  - option \"Owned\" [ref=E2]"])
    );
}

#[test]
fn test_pseudo_element_content() {
    let mut doc = Document::new("body");
    let link = doc.append_element_with(doc.root(), "a", &[("href", "/next")]);
    {
        let style = &mut doc.element_mut(link).unwrap().style;
        style.before_content = Some("none".into());
        style.after_content = Some("\"→\"".into());
    }
    doc.append_text(link, "Next");

    assert_eq!(
        snapshot(&mut doc),
        lines(&["- link \"Next→\" [ref=E1]:", "  - /url: /next"])
    );
}

#[test]
fn test_pseudo_content_from_captured_page() {
    let json = r#"{
        "root": {
            "kind": "element", "id": 0, "tag": "body",
            "children": [
                {"kind": "element", "id": 1, "tag": "a",
                 "attrs": [["href", "/next"]],
                 "style": {"display": "inline", "after": "\"→\""},
                 "rect": {"x": 0, "y": 0, "width": 40, "height": 16},
                 "children": [{"kind": "text", "id": 2, "text": "Next"}]}
            ]
        }
    }"#;
    let (mut doc, _) = Document::from_capture_json(json).unwrap();

    assert_eq!(
        snapshot(&mut doc),
        lines(&["- link \"Next→\" [ref=E1]:", "  - /url: /next"])
    );
}

#[test]
fn test_pseudo_text_parses_computed_content() {
    assert_eq!(pseudo_text("\"→\"").as_deref(), Some("→"));
    assert_eq!(pseudo_text(r#""say \"hi\"""#).as_deref(), Some("say \"hi\""));
    assert_eq!(pseudo_text(r#""a" "b""#).as_deref(), Some("ab"));
    assert_eq!(pseudo_text("\"\""), None);
    assert_eq!(pseudo_text("none"), None);
    assert_eq!(pseudo_text("counter(item)"), None);
    assert_eq!(pseudo_text("attr(title)"), None);
}

#[test]
fn test_rebuild_replaces_markers() {
    let mut doc = Document::new("body");
    let root = doc.root();
    let first = doc.append_element(root, "button");
    doc.append_text(first, "One");
    let second = doc.append_element(root, "button");
    doc.append_text(second, "Two");

    snapshot(&mut doc);
    assert_eq!(doc.query_marker("E2"), vec![second]);

    doc.set_attribute(first, "hidden", "");
    assert_eq!(snapshot(&mut doc), "- button \"Two\" [ref=E1]");
    assert_eq!(doc.query_marker("E1"), vec![second]);
    assert!(doc.query_marker("E2").is_empty());
}

#[test]
fn test_every_rendered_ref_has_one_marker() {
    let mut doc = Document::new("body");
    let root = doc.root();
    let nav = doc.append_element(root, "nav");
    for label in ["Home", "Docs", "Blog"] {
        let a = doc.append_element_with(nav, "a", &[("href", "#")]);
        doc.append_text(a, label);
    }
    let form = doc.append_element(root, "form");
    doc.append_element_with(form, "input", &[("placeholder", "Search")]);

    let (tree, count) = AriaSnapshotter::default().tree(&mut doc);
    let refs = tree.refs();
    assert!(!refs.is_empty());
    for aria_ref in &refs {
        assert_eq!(doc.query_marker(aria_ref).len(), 1, "ref {}", aria_ref);
    }
    assert_eq!(doc.markers().len() as u32, count);
}

#[test]
fn test_shared_counter_continues() {
    let mut doc = Document::new("body");
    let button = doc.append_element(doc.root(), "button");
    doc.append_text(button, "A");

    let resolver = HtmlRoleResolver::new();
    let mut counter = RefCounter::new();
    counter.next_ref();
    let root = doc.root();
    let tree = SnapshotBuilder::new(&resolver).build_with_counter(&mut doc, root, &mut counter);
    assert_eq!(tree.refs(), vec!["E2"]);
}

#[test]
fn test_pseudo_text_parsing() {
    assert_eq!(pseudo_text("\"abc\""), Some("abc".to_string()));
    assert_eq!(pseudo_text("none"), None);
    assert_eq!(pseudo_text("normal"), None);
    assert_eq!(pseudo_text("\"\""), None);
}
