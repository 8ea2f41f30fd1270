use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 7,
        method: "Runtime.evaluate".to_string(),
        params: Some(serde_json::json!({"expression": "1 + 1"})),
        session_id: Some("S1".to_string()),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["method"], "Runtime.evaluate");
    assert_eq!(json["sessionId"], "S1");
}

#[test]
fn test_cdp_request_omits_empty_fields() {
    let req = CdpRequest {
        id: 1,
        method: "Page.enable".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_error_response_deserialize() {
    let json = r#"{"id": 3, "error": {"code": -32000, "message": "Cannot find context with specified id"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(3));
    let error = resp.error.unwrap();
    assert_eq!(error.code, -32000);
    assert!(resp.result.is_none());
}

#[test]
fn test_event_has_no_id() {
    let json = r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.0}, "sessionId": "S1"}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert!(resp.id.is_none());
    assert_eq!(resp.method.as_deref(), Some("Page.loadEventFired"));
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "Chrome/126.0.0.0",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/abc"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert_eq!(version.protocol_version, "1.3");
    assert!(version.web_socket_debugger_url.starts_with("ws://"));
}

#[test]
fn test_remote_node_object() {
    let json = r#"{"type": "object", "subtype": "node", "className": "HTMLButtonElement", "objectId": "42.1"}"#;
    let obj: RemoteObject = serde_json::from_str(json).unwrap();
    assert!(obj.is_node());
    assert_eq!(obj.object_id.as_deref(), Some("42.1"));
}

#[test]
fn test_history_offsets() {
    let json = r#"{"currentIndex": 1, "entries": [
        {"id": 10, "url": "https://a.test/", "title": "a"},
        {"id": 11, "url": "https://b.test/", "title": "b"}
    ]}"#;
    let history: NavigationHistory = serde_json::from_str(json).unwrap();
    assert_eq!(history.entry_at_offset(-1).map(|e| e.id), Some(10));
    assert!(history.entry_at_offset(1).is_none());
    assert!(history.entry_at_offset(-2).is_none());
}

#[test]
fn test_input_enums_serialize() {
    assert_eq!(serde_json::to_string(&MouseButton::Left).unwrap(), "\"left\"");
    assert_eq!(
        serde_json::to_string(&MouseEventType::MousePressed).unwrap(),
        "\"mousePressed\""
    );
    assert_eq!(serde_json::to_string(&KeyEventType::KeyDown).unwrap(), "\"keyDown\"");
}
