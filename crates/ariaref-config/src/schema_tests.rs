use super::*;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.browser.endpoint, "http://localhost:9222");
    assert_eq!(config.browser.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.snapshot.max_iframe_depth, 5);
    assert_eq!(config.snapshot.max_name_length, 900);
    assert_eq!(config.stabilization.settle_delay(), Duration::from_secs(1));
    assert_eq!(config.stabilization.load_timeout(), Duration::from_secs(5));
    assert_eq!(config.preflight.max_wait_seconds, 30);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config: Config = toml::from_str(
        r#"
        [stabilization]
        settle_delay_ms = 250
        "#,
    )
    .unwrap();
    assert_eq!(config.stabilization.settle_delay_ms, 250);
    assert_eq!(config.stabilization.content_parsed_timeout_ms, 10000);
    assert_eq!(config.stabilization.poll_interval(), Duration::from_millis(100));
    assert_eq!(config.preflight.max_wait_seconds, 30);
}

#[test]
fn test_serialize_roundtrip_shape() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    assert!(text.contains("[browser]"));
    assert!(text.contains("max_iframe_depth = 5"));
}
