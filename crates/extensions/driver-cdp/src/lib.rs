//! # ariaref CDP Driver
//!
//! Runs the ariaref protocol against a live Chromium page over the Chrome
//! DevTools Protocol:
//!
//! - [`PageSnapshotter`] captures the DOM, renders the accessibility snapshot
//!   and writes the `data-ariaref` markers back onto the page.
//! - [`resolve`] maps a ref to the single live element carrying its marker.
//! - [`ActionExecutor`] performs typed actions and stabilizes the page after
//!   the ones that may navigate.
//!
//! Everything above the transport works through the [`BrowserPage`] trait;
//! [`PageSession`] is the CDP implementation.
//!
//! ```rust,ignore
//! let driver = AriaDriver::connect(&Config::default(), Some("https://example.com")).await?;
//! let snapshot = driver.snapshot().await?;
//! let request: ActionRequest = serde_json::from_str(r#"{"action": "click", "ref": "E1"}"#)?;
//! if driver.check(&request).is_none() {
//!     driver.perform(&request).await?;
//! }
//! ```

pub mod cdp;
pub mod driver;
pub mod executor;
pub mod page;
pub mod resolver;
pub mod scripts;
pub mod snapshot;
pub mod stabilize;

#[cfg(test)]
pub(crate) mod testing;

pub use cdp::{CdpClient, CdpError, ElementHandle, PageSession};
pub use driver::{AriaDriver, DriverError};
pub use executor::ActionExecutor;
pub use page::{BrowserPage, LoadState};
pub use resolver::{ResolveError, resolve};
pub use snapshot::{PageSnapshot, PageSnapshotter, SnapshotError};
pub use stabilize::{Stabilizer, wait_for_load_state};
