//! Action kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every action a planner may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Click,
    Hover,
    Fill,
    Focus,
    Check,
    Uncheck,
    Select,
    Enter,
    FillAndEnter,
    Wait,
    Goto,
    Back,
    Forward,
    Extract,
    Abort,
    Done,
}

impl ActionKind {
    /// Wire name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Click => "click",
            ActionKind::Hover => "hover",
            ActionKind::Fill => "fill",
            ActionKind::Focus => "focus",
            ActionKind::Check => "check",
            ActionKind::Uncheck => "uncheck",
            ActionKind::Select => "select",
            ActionKind::Enter => "enter",
            ActionKind::FillAndEnter => "fill_and_enter",
            ActionKind::Wait => "wait",
            ActionKind::Goto => "goto",
            ActionKind::Back => "back",
            ActionKind::Forward => "forward",
            ActionKind::Extract => "extract",
            ActionKind::Abort => "abort",
            ActionKind::Done => "done",
        }
    }

    /// Whether the action operates on an element named by a ref.
    pub fn targets_element(&self) -> bool {
        matches!(
            self,
            ActionKind::Click
                | ActionKind::Hover
                | ActionKind::Fill
                | ActionKind::Focus
                | ActionKind::Check
                | ActionKind::Uncheck
                | ActionKind::Select
                | ActionKind::Enter
                | ActionKind::FillAndEnter
        )
    }

    /// Whether the action needs a non-empty `value`.
    pub fn requires_value(&self) -> bool {
        matches!(
            self,
            ActionKind::Fill | ActionKind::Select | ActionKind::FillAndEnter
        )
    }

    /// Whether the action may navigate or re-render, so the page must be
    /// stabilized before control returns.
    pub fn stabilizes(&self) -> bool {
        matches!(
            self,
            ActionKind::Click
                | ActionKind::Enter
                | ActionKind::Select
                | ActionKind::FillAndEnter
                | ActionKind::Goto
                | ActionKind::Back
                | ActionKind::Forward
        )
    }

    /// Signals for the orchestration layer; nothing happens in the browser.
    pub fn is_signal(&self) -> bool {
        matches!(
            self,
            ActionKind::Extract | ActionKind::Abort | ActionKind::Done
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
