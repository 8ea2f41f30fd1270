//! # ariaref Protocols
//!
//! Shared protocol types for the ariaref workspace: the action vocabulary a
//! planner can emit against a snapshot, and the structured errors an action
//! can fail with.
//!
//! ## Core Types
//!
//! - [`ActionKind`] - Closed set of action names
//! - [`ActionRequest`] - Wire form `{ action, ref?, value?, seconds? }`
//! - [`PageAction`] - Typed form carrying exactly the fields each kind needs
//! - [`ActionError`] - Everything an action can fail with

pub mod action;
pub mod error;

pub use action::{ActionKind, ActionRequest, PageAction};
pub use error::{ActionError, BrowserActionError, InvalidRefError};
