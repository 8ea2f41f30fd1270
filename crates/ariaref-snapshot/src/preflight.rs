//! Text-only checks on a proposed action, run before it reaches the browser.

use ariaref_config::PreflightConfig;
use ariaref_protocols::{ActionKind, ActionRequest};
use tracing::debug;

/// Longest `wait` accepted by default, in seconds.
pub const DEFAULT_MAX_WAIT_SECONDS: u64 = 30;

/// Validates actions against the snapshot text they were chosen from.
#[derive(Debug, Clone)]
pub struct PreflightValidator {
    max_wait_seconds: u64,
}

impl Default for PreflightValidator {
    fn default() -> Self {
        Self {
            max_wait_seconds: DEFAULT_MAX_WAIT_SECONDS,
        }
    }
}

impl From<&PreflightConfig> for PreflightValidator {
    fn from(config: &PreflightConfig) -> Self {
        Self::new(config.max_wait_seconds)
    }
}

impl PreflightValidator {
    pub fn new(max_wait_seconds: u64) -> Self {
        Self { max_wait_seconds }
    }

    pub fn max_wait_seconds(&self) -> u64 {
        self.max_wait_seconds
    }

    /// Return a corrective message for the first problem found, or `None`.
    pub fn check(&self, action: &ActionRequest, snapshot: &str) -> Option<String> {
        if let Some(aria_ref) = action.aria_ref.as_deref() {
            if !snapshot_mentions_ref(snapshot, aria_ref) {
                debug!(aria_ref, action = %action.action, "ref not in snapshot");
                return Some(format!(
                    "can't find ref {} in the snapshot, pick a valid ref from the snapshot",
                    aria_ref
                ));
            }
        }

        if action.action == ActionKind::Wait {
            if let Some(seconds) = action.wait_duration() {
                if seconds > self.max_wait_seconds as i64 {
                    debug!(seconds, max = self.max_wait_seconds, "wait too long");
                    return Some(format!(
                        "wait time too long ({}s > {}s), use a shorter wait time",
                        seconds, self.max_wait_seconds
                    ));
                }
            }
        }

        None
    }
}

/// Whether `snapshot` contains `[ref=<r>]` or the bare `[<r>]` form.
fn snapshot_mentions_ref(snapshot: &str, aria_ref: &str) -> bool {
    snapshot.contains(&format!("[ref={}]", aria_ref)) || snapshot.contains(&format!("[{}]", aria_ref))
}

/// Check with the default limits.
pub fn check_action(action: &ActionRequest, snapshot: &str) -> Option<String> {
    PreflightValidator::default().check(action, snapshot)
}
