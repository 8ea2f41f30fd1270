//! YAML scalar quoting for snapshot lines.

/// Single-quote a mapping key when plain YAML would misread it.
pub fn escape_key_if_needed(key: &str) -> String {
    if !needs_quotes(key) {
        return key.to_string();
    }
    format!("'{}'", key.replace('\'', "''"))
}

/// Double-quote a scalar value when plain YAML would misread it.
pub fn escape_value_if_needed(value: &str) -> String {
    if !needs_quotes(value) {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if is_escaped_control(c) => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn is_escaped_control(c: char) -> bool {
    matches!(c as u32, 0x00..=0x1f | 0x7f..=0x9f)
}

fn is_quoting_control(c: char) -> bool {
    matches!(c as u32, 0x00..=0x08 | 0x0b | 0x0c | 0x0e..=0x1f | 0x7f..=0x9f)
}

const RESERVED_WORDS: &[&str] = &["y", "n", "yes", "no", "true", "false", "on", "off", "null"];

fn looks_numeric(s: &str) -> bool {
    let t = s.trim();
    if t.is_empty() {
        return false;
    }
    let lower = t.to_ascii_lowercase();
    let unsigned = lower.trim_start_matches(['+', '-']);
    if unsigned.contains("inf") || unsigned.contains("nan") {
        return unsigned == "infinity";
    }
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            return !digits.is_empty() && u64::from_str_radix(digits, radix).is_ok();
        }
    }
    lower.parse::<f64>().is_ok()
}

/// Whether a plain scalar would be parsed as something other than this string.
pub fn needs_quotes(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };
    let last = s.chars().next_back().unwrap_or(first);
    if first.is_whitespace() || last.is_whitespace() {
        return true;
    }
    if s.chars().any(is_quoting_control) {
        return true;
    }
    if first == '-' || first == '[' {
        return true;
    }
    let chars: Vec<char> = s.chars().collect();
    for pair in chars.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if (a == '\n' || a == ':') && b.is_whitespace() {
            return true;
        }
        if a.is_whitespace() && b == '#' {
            return true;
        }
    }
    if matches!(last, '\n' | ':') {
        return true;
    }
    if s.contains(['\n', '\r']) {
        return true;
    }
    if matches!(first, '&' | '*' | ']' | ',' | '?' | '!' | '>' | '|' | '@' | '"' | '\'' | '#' | '%') {
        return true;
    }
    if s.contains(['{', '}', '`']) {
        return true;
    }
    if looks_numeric(s) {
        return true;
    }
    RESERVED_WORDS.contains(&s.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_strings_unquoted() {
        assert!(!needs_quotes("button \"Save\" [ref=E1]"));
        assert!(!needs_quotes("Hello world"));
        assert!(!needs_quotes("https://example.com/a"));
        assert!(!needs_quotes("a-b"));
    }

    #[test]
    fn test_quote_triggers() {
        for s in [
            "", " lead", "trail ", "- dash", "[x]", "key: value", "ends:", "a #b", "line\nbreak",
            "&anchor", "*alias", "@at", "%pct", "{brace}", "tick`", "42", "3.14", "0x1f", "yes",
            "No", "null", "TRUE", "tab\u{0b}",
        ] {
            assert!(needs_quotes(s), "expected quotes for {:?}", s);
        }
        assert!(!needs_quotes("a#b"));
        assert!(!needs_quotes("nanny"));
    }

    #[test]
    fn test_escape_key() {
        assert_eq!(escape_key_if_needed("link \"Home\""), "link \"Home\"");
        assert_eq!(
            escape_key_if_needed("link \"Docs: it's here\""),
            "'link \"Docs: it''s here\"'"
        );
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(escape_value_if_needed("plain"), "plain");
        assert_eq!(escape_value_if_needed("a: \"b\""), "\"a: \\\"b\\\"\"");
        assert_eq!(escape_value_if_needed("x\ny"), "\"x\\ny\"");
        assert_eq!(escape_value_if_needed("123"), "\"123\"");
        assert_eq!(escape_value_if_needed(" \u{01}"), "\" \\x01\"");
    }
}
