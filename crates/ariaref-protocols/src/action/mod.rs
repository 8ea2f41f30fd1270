//! Action vocabulary.

mod kind;
mod page_action;
mod request;

pub use kind::ActionKind;
pub use page_action::PageAction;
pub use request::ActionRequest;

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
