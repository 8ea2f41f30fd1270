//! Typed actions.

use serde::{Deserialize, Serialize};

use super::{ActionKind, ActionRequest};
use crate::error::BrowserActionError;

/// An action with exactly the fields its kind needs.
///
/// Built from an [`ActionRequest`] via `TryFrom`, which is where missing
/// values, blank URLs and malformed wait durations are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PageAction {
    Click {
        #[serde(rename = "ref")]
        aria_ref: String,
    },
    Hover {
        #[serde(rename = "ref")]
        aria_ref: String,
    },
    Fill {
        #[serde(rename = "ref")]
        aria_ref: String,
        value: String,
    },
    Focus {
        #[serde(rename = "ref")]
        aria_ref: String,
    },
    Check {
        #[serde(rename = "ref")]
        aria_ref: String,
    },
    Uncheck {
        #[serde(rename = "ref")]
        aria_ref: String,
    },
    Select {
        #[serde(rename = "ref")]
        aria_ref: String,
        value: String,
    },
    Enter {
        #[serde(rename = "ref")]
        aria_ref: String,
    },
    FillAndEnter {
        #[serde(rename = "ref")]
        aria_ref: String,
        value: String,
    },
    Wait {
        seconds: u64,
    },
    Goto {
        url: String,
    },
    Back,
    Forward,
    Extract,
    Abort,
    Done,
}

impl PageAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PageAction::Click { .. } => ActionKind::Click,
            PageAction::Hover { .. } => ActionKind::Hover,
            PageAction::Fill { .. } => ActionKind::Fill,
            PageAction::Focus { .. } => ActionKind::Focus,
            PageAction::Check { .. } => ActionKind::Check,
            PageAction::Uncheck { .. } => ActionKind::Uncheck,
            PageAction::Select { .. } => ActionKind::Select,
            PageAction::Enter { .. } => ActionKind::Enter,
            PageAction::FillAndEnter { .. } => ActionKind::FillAndEnter,
            PageAction::Wait { .. } => ActionKind::Wait,
            PageAction::Goto { .. } => ActionKind::Goto,
            PageAction::Back => ActionKind::Back,
            PageAction::Forward => ActionKind::Forward,
            PageAction::Extract => ActionKind::Extract,
            PageAction::Abort => ActionKind::Abort,
            PageAction::Done => ActionKind::Done,
        }
    }

    /// Ref of the targeted element, for element actions.
    pub fn aria_ref(&self) -> Option<&str> {
        match self {
            PageAction::Click { aria_ref }
            | PageAction::Hover { aria_ref }
            | PageAction::Fill { aria_ref, .. }
            | PageAction::Focus { aria_ref }
            | PageAction::Check { aria_ref }
            | PageAction::Uncheck { aria_ref }
            | PageAction::Select { aria_ref, .. }
            | PageAction::Enter { aria_ref }
            | PageAction::FillAndEnter { aria_ref, .. } => Some(aria_ref),
            _ => None,
        }
    }
}

impl TryFrom<&ActionRequest> for PageAction {
    type Error = BrowserActionError;

    fn try_from(request: &ActionRequest) -> Result<Self, Self::Error> {
        let kind = request.action;

        let aria_ref = || {
            request
                .aria_ref
                .clone()
                .filter(|r| !r.is_empty())
                .ok_or_else(|| BrowserActionError::new(kind, format!("{} requires a ref", kind)))
        };
        let value = || {
            request
                .non_empty_value()
                .map(str::to_string)
                .ok_or_else(|| {
                    BrowserActionError::new(kind, format!("{} requires a non-empty value", kind))
                })
        };

        let action = match kind {
            ActionKind::Click => PageAction::Click { aria_ref: aria_ref()? },
            ActionKind::Hover => PageAction::Hover { aria_ref: aria_ref()? },
            ActionKind::Fill => PageAction::Fill {
                aria_ref: aria_ref()?,
                value: value()?,
            },
            ActionKind::Focus => PageAction::Focus { aria_ref: aria_ref()? },
            ActionKind::Check => PageAction::Check { aria_ref: aria_ref()? },
            ActionKind::Uncheck => PageAction::Uncheck { aria_ref: aria_ref()? },
            ActionKind::Select => PageAction::Select {
                aria_ref: aria_ref()?,
                value: value()?,
            },
            ActionKind::Enter => PageAction::Enter { aria_ref: aria_ref()? },
            ActionKind::FillAndEnter => PageAction::FillAndEnter {
                aria_ref: aria_ref()?,
                value: value()?,
            },
            ActionKind::Wait => {
                let seconds = request
                    .wait_duration()
                    .and_then(|s| u64::try_from(s).ok())
                    .ok_or_else(|| {
                        BrowserActionError::new(
                            kind,
                            "wait requires a non-negative integer number of seconds",
                        )
                    })?;
                PageAction::Wait { seconds }
            }
            ActionKind::Goto => {
                let url = request
                    .value
                    .as_deref()
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .ok_or_else(|| BrowserActionError::new(kind, "goto requires a non-empty url"))?;
                PageAction::Goto {
                    url: url.to_string(),
                }
            }
            ActionKind::Back => PageAction::Back,
            ActionKind::Forward => PageAction::Forward,
            ActionKind::Extract => PageAction::Extract,
            ActionKind::Abort => PageAction::Abort,
            ActionKind::Done => PageAction::Done,
        };

        Ok(action)
    }
}

impl TryFrom<ActionRequest> for PageAction {
    type Error = BrowserActionError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        PageAction::try_from(&request)
    }
}
