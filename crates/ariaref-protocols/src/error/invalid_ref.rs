//! Ref resolution errors.

use thiserror::Error;

/// A ref did not denote exactly one live element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRefError {
    #[error("can't find ref {aria_ref} on the page")]
    NotFound { aria_ref: String },

    #[error("multiple elements found for ref {aria_ref} ({count} matches), possible structural issue")]
    Ambiguous { aria_ref: String, count: usize },
}

impl InvalidRefError {
    pub fn not_found(aria_ref: impl Into<String>) -> Self {
        InvalidRefError::NotFound {
            aria_ref: aria_ref.into(),
        }
    }

    pub fn ambiguous(aria_ref: impl Into<String>, count: usize) -> Self {
        InvalidRefError::Ambiguous {
            aria_ref: aria_ref.into(),
            count,
        }
    }

    /// The ref that failed to resolve.
    pub fn aria_ref(&self) -> &str {
        match self {
            InvalidRefError::NotFound { aria_ref } | InvalidRefError::Ambiguous { aria_ref, .. } => {
                aria_ref
            }
        }
    }

    /// Extra detail beyond the ref itself.
    pub fn detail(&self) -> Option<String> {
        match self {
            InvalidRefError::NotFound { .. } => None,
            InvalidRefError::Ambiguous { count, .. } => Some(format!("{} matching elements", count)),
        }
    }
}
