//! Page-side scripts.
//!
//! The capture script keeps every serialized node in `window.__ariarefNodes`
//! under its capture id, so marker writes computed on the Rust side can be
//! applied to the same live nodes afterwards. Every walk descends into open
//! shadow roots and same-origin frames.

use ariaref_snapshot::{MARKER_ATTRIBUTE, MarkerWrite};

/// Deepest frame nesting the capture script serializes.
pub const MAX_CAPTURE_FRAME_DEPTH: usize = 6;

const CAPTURE_BODY: &str = r#"
  const nodes = [];
  const ids = new Map();
  const idOf = (node) => {
    let id = ids.get(node);
    if (id === undefined) {
      id = nodes.length;
      nodes.push(node);
      ids.set(node, id);
    }
    return id;
  };
  const pseudo = (el, which) => {
    const content = getComputedStyle(el, which).content;
    if (!content || content === 'none' || content === 'normal') return null;
    return content;
  };
  const rectOf = (el) => {
    const r = el.getBoundingClientRect();
    return { x: r.x, y: r.y, width: r.width, height: r.height };
  };
  const serializeChildren = (list, depth) => {
    const out = [];
    for (const child of list) {
      const node = serialize(child, depth);
      if (node) out.push(node);
    }
    return out;
  };
  const serialize = (node, depth) => {
    if (node.nodeType === Node.TEXT_NODE) {
      return { kind: 'text', id: idOf(node), text: node.data, slotted: !!node.assignedSlot };
    }
    if (node.nodeType !== Node.ELEMENT_NODE) return null;
    const el = node;
    const cs = getComputedStyle(el);
    const out = {
      kind: 'element',
      id: idOf(el),
      tag: el.localName,
      attrs: Array.from(el.attributes, (a) => [a.name, a.value]),
      style: {
        display: cs.display,
        visibility: cs.visibility,
        opacity: parseFloat(cs.opacity),
        cursor: cs.cursor,
        pointerEvents: cs.pointerEvents,
        before: pseudo(el, '::before'),
        after: pseudo(el, '::after'),
      },
      rect: rectOf(el),
      slotted: !!el.assignedSlot,
      children: serializeChildren(el.childNodes, depth),
      shadow: el.shadowRoot ? serializeChildren(el.shadowRoot.childNodes, depth) : null,
      assigned: [],
      frame: null,
    };
    if (el instanceof HTMLInputElement || el instanceof HTMLTextAreaElement || el instanceof HTMLSelectElement) {
      out.value = el.value;
    }
    if (el instanceof HTMLInputElement && (el.type === 'checkbox' || el.type === 'radio')) {
      out.checked = el.checked;
      out.indeterminate = el.indeterminate;
    }
    if (el instanceof HTMLOptionElement) {
      out.selected = el.selected;
    }
    if (el instanceof HTMLSlotElement) {
      out.assigned = el.assignedNodes({ flatten: true })
        .filter((n) => n.nodeType === Node.ELEMENT_NODE || n.nodeType === Node.TEXT_NODE)
        .map(idOf);
    }
    if (el instanceof HTMLIFrameElement || el instanceof HTMLFrameElement) {
      let doc = null;
      try { doc = el.contentDocument; } catch (e) { doc = null; }
      if (doc && doc.body && depth < MAX_DEPTH) {
        out.frame = { access: 'same_origin', body: serialize(doc.body, depth + 1) };
      } else {
        out.frame = { access: 'cross_origin' };
      }
    }
    return out;
  };
  const root = serialize(document.body || document.documentElement, 0);
  window.__ariarefNodes = nodes;
  return JSON.stringify({
    url: location.href,
    viewport: { x: 0, y: 0, width: innerWidth, height: innerHeight },
    root,
  });
"#;

const DEEP_ELEMENTS: &str = r#"
  const deepElements = (root, visit) => {
    const stack = [root];
    while (stack.length) {
      const scope = stack.pop();
      for (const el of scope.querySelectorAll('*')) {
        visit(el);
        if (el.shadowRoot) stack.push(el.shadowRoot);
        if (el instanceof HTMLIFrameElement || el instanceof HTMLFrameElement) {
          let doc = null;
          try { doc = el.contentDocument; } catch (e) { doc = null; }
          if (doc) stack.push(doc);
        }
      }
    }
  };
"#;

/// Expression returning the capture payload as a JSON string.
pub fn capture_expression() -> String {
    format!(
        "(() => {{ const MAX_DEPTH = {}; {} }})()",
        MAX_CAPTURE_FRAME_DEPTH, CAPTURE_BODY
    )
}

/// Expression that strips every marker on the page, then sets the given ones
/// on the nodes of the latest capture. Evaluates to the number written.
pub fn commit_markers_expression(writes: &[MarkerWrite]) -> Result<String, serde_json::Error> {
    let attribute = serde_json::to_string(MARKER_ATTRIBUTE)?;
    let writes = serde_json::to_string(writes)?;
    Ok(format!(
        r#"((attr, writes) => {{
  {deep}
  deepElements(document, (el) => el.removeAttribute(attr));
  const nodes = window.__ariarefNodes || [];
  let written = 0;
  for (const w of writes) {{
    const el = nodes[w.id];
    if (el && el.nodeType === Node.ELEMENT_NODE) {{
      el.setAttribute(attr, w.ref);
      written += 1;
    }}
  }}
  return written;
}})({attribute}, {writes})"#,
        deep = DEEP_ELEMENTS,
    ))
}

/// Expression evaluating to the array of live elements carrying `aria_ref`.
pub fn query_marker_expression(aria_ref: &str) -> Result<String, serde_json::Error> {
    let attribute = serde_json::to_string(MARKER_ATTRIBUTE)?;
    let aria_ref = serde_json::to_string(aria_ref)?;
    Ok(format!(
        r#"((attr, value) => {{
  {deep}
  const found = [];
  deepElements(document, (el) => {{
    if (el.getAttribute(attr) === value) found.push(el);
  }});
  return found;
}})({attribute}, {aria_ref})"#,
        deep = DEEP_ELEMENTS,
    ))
}

/// Scrolls the element into view and returns its border box in top-level
/// viewport coordinates, or `null` when it has no area.
pub const ELEMENT_RECT_FUNCTION: &str = r#"function() {
  this.scrollIntoView({ block: 'center', inline: 'center', behavior: 'instant' });
  const r = this.getBoundingClientRect();
  if (!r.width || !r.height) return null;
  let x = r.x, y = r.y;
  let win = this.ownerDocument.defaultView;
  while (win && win.frameElement) {
    const frame = win.frameElement;
    const fr = frame.getBoundingClientRect();
    x += fr.x + frame.clientLeft;
    y += fr.y + frame.clientTop;
    win = win.parent;
  }
  return { x, y, width: r.width, height: r.height };
}"#;

pub const FOCUS_FUNCTION: &str = r#"function() { this.focus(); }"#;

/// Focuses the element and selects its current content so typed text replaces it.
pub const PREPARE_FILL_FUNCTION: &str = r#"function() {
  this.focus();
  if (this instanceof HTMLInputElement || this instanceof HTMLTextAreaElement) {
    this.select();
  } else if (this.isContentEditable) {
    const range = this.ownerDocument.createRange();
    range.selectNodeContents(this);
    const selection = this.ownerDocument.defaultView.getSelection();
    selection.removeAllRanges();
    selection.addRange(range);
  } else {
    throw new Error('element is not fillable');
  }
}"#;

/// Sets the value directly when typing did not produce it (date inputs and
/// similar), then fires `change`.
pub const FINISH_FILL_FUNCTION: &str = r#"function(value) {
  if ((this instanceof HTMLInputElement || this instanceof HTMLTextAreaElement) && this.value !== value) {
    this.value = value;
    this.dispatchEvent(new Event('input', { bubbles: true }));
  }
  this.dispatchEvent(new Event('change', { bubbles: true }));
}"#;

/// Toggles a native or ARIA checkbox until it matches; returns the final state.
pub const SET_CHECKED_FUNCTION: &str = r#"function(checked) {
  const state = () => (this instanceof HTMLInputElement && (this.type === 'checkbox' || this.type === 'radio'))
    ? this.checked
    : this.getAttribute('aria-checked') === 'true';
  if (state() === checked) return true;
  this.click();
  return state() === checked;
}"#;

/// Selects the option whose value, label or text matches; returns whether one did.
pub const SELECT_OPTION_FUNCTION: &str = r#"function(value) {
  if (!(this instanceof HTMLSelectElement)) throw new Error('element is not a <select>');
  const wanted = value.trim();
  const options = Array.from(this.options);
  const option = options.find((o) => o.value === value)
    || options.find((o) => o.label.trim() === wanted)
    || options.find((o) => o.textContent.trim() === wanted);
  if (!option) return false;
  option.selected = true;
  this.dispatchEvent(new Event('input', { bubbles: true }));
  this.dispatchEvent(new Event('change', { bubbles: true }));
  return true;
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_expression_is_invoked_iife() {
        let expr = capture_expression();
        assert!(expr.starts_with("(() => {"));
        assert!(expr.ends_with("})()"));
        assert!(expr.contains("const MAX_DEPTH = 6;"));
        assert!(expr.contains("window.__ariarefNodes = nodes"));
    }

    #[test]
    fn test_pseudo_content_sent_as_computed() {
        assert!(CAPTURE_BODY.contains("return content;"));
        assert!(!CAPTURE_BODY.contains("JSON.parse(content)"));
    }

    #[test]
    fn test_commit_markers_embeds_writes_as_json() {
        let writes = vec![
            MarkerWrite {
                capture_id: 3,
                aria_ref: "E1".into(),
            },
            MarkerWrite {
                capture_id: 8,
                aria_ref: "E2".into(),
            },
        ];
        let expr = commit_markers_expression(&writes).unwrap();
        assert!(expr.contains(r#"("data-ariaref", [{"id":3,"ref":"E1"},{"id":8,"ref":"E2"}])"#));
        assert!(expr.contains("removeAttribute(attr)"));
    }

    #[test]
    fn test_query_marker_escapes_ref() {
        let expr = query_marker_expression("E1\"); alert(1); (\"").unwrap();
        assert!(expr.contains(r#""E1\"); alert(1); (\"""#));
    }
}
