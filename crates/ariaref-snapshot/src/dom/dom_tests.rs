use super::*;

#[test]
fn test_append_and_attributes() {
    let mut doc = Document::new("body");
    let root = doc.root();
    let button = doc.append_element_with(root, "BUTTON", &[("id", "save")]);
    doc.append_text(button, "Save");

    assert_eq!(doc.tag(button), Some("button"));
    assert_eq!(doc.attribute(button, "id"), Some("save"));
    assert_eq!(doc.children(root), &[button]);
    assert_eq!(doc.text_content(root), "Save");

    doc.set_attribute(button, "id", "other");
    assert_eq!(doc.attribute(button, "id"), Some("other"));
    doc.remove_attribute(button, "id");
    assert!(!doc.has_attribute(button, "id"));
}

#[test]
fn test_composed_parent_crosses_shadow_root() {
    let mut doc = Document::new("body");
    let host = doc.append_element(doc.root(), "my-widget");
    let shadow = doc.attach_shadow(host);
    let inner = doc.append_element(shadow, "span");

    assert_eq!(doc.composed_parent(inner), Some(host));
    let chain: Vec<_> = doc.self_and_ancestors(inner).collect();
    assert_eq!(chain, vec![inner, host, doc.root()]);
    assert_eq!(doc.attach_shadow(host), shadow);
}

#[test]
fn test_descendants_include_shadow_but_not_frames() {
    let mut doc = Document::new("body");
    let host = doc.append_element(doc.root(), "div");
    let shadow = doc.attach_shadow(host);
    let in_shadow = doc.append_element(shadow, "b");
    let frame = doc.append_element(doc.root(), "iframe");
    let frame_body = doc.attach_frame_document(frame, "body");
    let in_frame = doc.append_element(frame_body, "p");

    let all = doc.descendants(doc.root());
    assert!(all.contains(&in_shadow));
    assert!(all.contains(&frame));
    assert!(!all.contains(&in_frame));
    assert_eq!(doc.tree_root(in_frame), frame_body);
}

#[test]
fn test_element_by_id_stays_in_document() {
    let mut doc = Document::new("body");
    let label = doc.append_element_with(doc.root(), "span", &[("id", "lbl")]);
    let frame = doc.append_element(doc.root(), "iframe");
    let body = doc.attach_frame_document(frame, "body");
    let inner = doc.append_element_with(body, "span", &[("id", "lbl")]);

    assert_eq!(doc.element_by_id(frame, "lbl"), Some(label));
    assert_eq!(doc.element_by_id(body, "lbl"), Some(inner));
    assert_eq!(doc.element_by_id(label, "missing"), None);
}

#[test]
fn test_strip_markers_only_touches_subtree() {
    let mut doc = Document::new("body");
    let a = doc.append_element_with(doc.root(), "a", &[(MARKER_ATTRIBUTE, "E1")]);
    let frame = doc.append_element(doc.root(), "iframe");
    let body = doc.attach_frame_document(frame, "body");
    let b = doc.append_element_with(body, "b", &[(MARKER_ATTRIBUTE, "E2")]);

    doc.strip_markers(doc.root());
    assert!(!doc.has_attribute(a, MARKER_ATTRIBUTE));
    assert_eq!(doc.query_marker("E2"), vec![b]);
    assert_eq!(doc.markers(), vec![(b, "E2".to_string())]);
}

#[test]
fn test_rect_geometry() {
    let r = Rect::new(10.0, 10.0, 20.0, 10.0);
    assert_eq!(r.center(), (20.0, 15.0));
    assert!(r.contains(15.0, 15.0));
    assert!(!r.contains(5.0, 15.0));
    assert!(r.intersects(&Rect::new(25.0, 15.0, 100.0, 100.0)));
    assert!(!r.intersects(&Rect::new(31.0, 0.0, 5.0, 5.0)));
    assert!(!Rect::new(0.0, 0.0, 0.0, 5.0).has_area());
}

fn sample_capture() -> serde_json::Value {
    serde_json::json!({
        "url": "https://example.com/",
        "viewport": {"x": 0.0, "y": 0.0, "width": 800.0, "height": 600.0},
        "root": {
            "kind": "element", "id": 0, "tag": "BODY",
            "style": {"display": "block", "visibility": "visible", "opacity": 1.0,
                      "cursor": "auto", "pointerEvents": "auto"},
            "rect": {"x": 0.0, "y": 0.0, "width": 800.0, "height": 600.0},
            "children": [
                {"kind": "element", "id": 1, "tag": "BUTTON", "attrs": [["id", "x"]],
                 "rect": {"x": 10.0, "y": 10.0, "width": 50.0, "height": 20.0},
                 "children": [{"kind": "text", "id": 2, "text": "Save"}]},
                {"kind": "element", "id": 3, "tag": "x-card",
                 "children": [{"kind": "text", "id": 4, "text": "light", "slotted": true}],
                 "shadow": [{"kind": "element", "id": 5, "tag": "slot", "assigned": [4]}]},
                {"kind": "element", "id": 6, "tag": "iframe",
                 "frame": {"access": "cross_origin"}},
                {"kind": "element", "id": 7, "tag": "iframe",
                 "frame": {"access": "same_origin",
                           "body": {"kind": "element", "id": 8, "tag": "body"}}}
            ]
        }
    })
}

#[test]
fn test_from_capture_builds_arena() {
    let json = sample_capture().to_string();
    let (doc, url) = Document::from_capture_json(&json).unwrap();
    assert_eq!(url.as_deref(), Some("https://example.com/"));
    assert_eq!(doc.tag(doc.root()), Some("body"));
    assert_eq!(doc.viewport().map(|v| v.width), Some(800.0));

    let button = doc.children(doc.root())[0];
    assert_eq!(doc.attribute(button, "id"), Some("x"));
    assert_eq!(doc.node(button).capture_id, Some(1));
    assert_eq!(doc.element(button).and_then(|e| e.rect).map(|r| r.width), Some(50.0));

    let card = doc.children(doc.root())[1];
    let shadow = doc.element(card).and_then(|e| e.shadow_root).unwrap();
    let slot = doc.children(shadow)[0];
    let light_text = doc.children(card)[0];
    assert_eq!(doc.element(slot).unwrap().assigned_nodes, vec![light_text]);
    assert!(doc.node(light_text).slotted);

    let cross = doc.children(doc.root())[2];
    assert_eq!(doc.element(cross).unwrap().frame, Some(FrameContent::CrossOrigin));
    let same = doc.children(doc.root())[3];
    assert!(matches!(
        doc.element(same).unwrap().frame,
        Some(FrameContent::SameOrigin(_))
    ));
}

#[test]
fn test_from_capture_rejects_text_root() {
    let json = r#"{"root": {"kind": "text", "id": 0, "text": "hi"}}"#;
    assert!(matches!(
        Document::from_capture_json(json),
        Err(CaptureError::RootNotElement)
    ));
}

#[test]
fn test_from_capture_rejects_unknown_assignment() {
    let json = r#"{"root": {"kind": "element", "id": 0, "tag": "slot", "assigned": [42]}}"#;
    assert!(matches!(
        Document::from_capture_json(json),
        Err(CaptureError::UnknownNode(42))
    ));
}

#[test]
fn test_marker_writes_use_capture_ids() {
    let json = sample_capture().to_string();
    let (mut doc, _) = Document::from_capture_json(&json).unwrap();
    let button = doc.children(doc.root())[0];
    doc.set_attribute(button, MARKER_ATTRIBUTE, "E1");

    let writes = doc.marker_writes();
    assert_eq!(
        writes,
        vec![MarkerWrite {
            capture_id: 1,
            aria_ref: "E1".to_string()
        }]
    );
    let wire = serde_json::to_value(&writes).unwrap();
    assert_eq!(wire[0]["id"], 1);
    assert_eq!(wire[0]["ref"], "E1");
}
