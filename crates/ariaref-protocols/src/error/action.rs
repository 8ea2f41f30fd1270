//! Action execution errors.

use std::error::Error as StdError;

use thiserror::Error;

use super::InvalidRefError;
use crate::action::ActionKind;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An action could not be carried out.
///
/// Covers both precondition failures (no cause) and wrapped page or
/// transport failures (cause attached).
#[derive(Debug, Error)]
#[error("{action} failed: {message}")]
pub struct BrowserActionError {
    pub action: ActionKind,
    pub message: String,
    #[source]
    pub cause: Option<BoxError>,
}

impl BrowserActionError {
    pub fn new(action: ActionKind, message: impl Into<String>) -> Self {
        Self {
            action,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(
        action: ActionKind,
        message: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self {
            action,
            message: message.into(),
            cause: Some(cause.into()),
        }
    }
}

/// Everything an action can fail with.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    InvalidRef(#[from] InvalidRefError),

    #[error(transparent)]
    BrowserAction(#[from] BrowserActionError),

    #[error("{action} was cancelled")]
    Cancelled { action: ActionKind },
}

impl ActionError {
    /// Kind of the action that failed, when known.
    pub fn action(&self) -> Option<ActionKind> {
        match self {
            ActionError::InvalidRef(_) => None,
            ActionError::BrowserAction(e) => Some(e.action),
            ActionError::Cancelled { action } => Some(*action),
        }
    }

    pub fn is_invalid_ref(&self) -> bool {
        matches!(self, ActionError::InvalidRef(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_action_display() {
        let err = BrowserActionError::new(ActionKind::Fill, "fill requires a non-empty value");
        assert_eq!(err.to_string(), "fill failed: fill requires a non-empty value");
        assert!(err.cause.is_none());
    }

    #[test]
    fn test_browser_action_keeps_cause() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "socket closed");
        let err = BrowserActionError::with_cause(ActionKind::Click, "click dispatch failed", io_err);
        let source = StdError::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("socket closed"));
    }

    #[test]
    fn test_invalid_ref_passes_through() {
        let err: ActionError = InvalidRefError::not_found("E9").into();
        assert!(err.is_invalid_ref());
        assert_eq!(err.to_string(), "can't find ref E9 on the page");
        assert!(err.action().is_none());
    }

    #[test]
    fn test_cancelled_display() {
        let err = ActionError::Cancelled {
            action: ActionKind::Wait,
        };
        assert_eq!(err.to_string(), "wait was cancelled");
        assert_eq!(err.action(), Some(ActionKind::Wait));
    }
}
