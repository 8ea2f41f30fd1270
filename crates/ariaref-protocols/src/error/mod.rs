//! Error types for the ariaref protocol layer.

mod action;
mod invalid_ref;

pub use action::*;
pub use invalid_ref::*;
