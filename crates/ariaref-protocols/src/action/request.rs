//! Loosely-typed action request as emitted by a planner.

use serde::{Deserialize, Serialize};

use super::ActionKind;

/// Action request in wire form.
///
/// ```json
/// { "action": "fill", "ref": "E4", "value": "hello" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: ActionKind,

    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub aria_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Explicit wait duration; takes precedence over `value` for waits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
}

impl ActionRequest {
    pub fn new(action: ActionKind) -> Self {
        Self {
            action,
            aria_ref: None,
            value: None,
            seconds: None,
        }
    }

    pub fn with_ref(mut self, aria_ref: impl Into<String>) -> Self {
        self.aria_ref = Some(aria_ref.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_seconds(mut self, seconds: u64) -> Self {
        self.seconds = Some(seconds);
        self
    }

    /// Wait duration in seconds: `seconds` if present, else `value` parsed as
    /// an integer. `None` when neither yields a number.
    pub fn wait_duration(&self) -> Option<i64> {
        if let Some(seconds) = self.seconds {
            return Some(i64::try_from(seconds).unwrap_or(i64::MAX));
        }
        self.value.as_deref()?.trim().parse::<i64>().ok()
    }

    /// The `value` field when it is present and non-empty.
    pub fn non_empty_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}
