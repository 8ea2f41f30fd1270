//! Chrome DevTools Protocol transport.
//!
//! A WebSocket JSON-RPC client with one page session per attached target.
//! Only the domains the snapshotter and the action executor need are wrapped:
//! `Runtime` for scripts and element handles, `Input` for real mouse and
//! keyboard events, `Page` for navigation and history.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let page = client.new_page(Some("https://example.com")).await?;
//! let url = page.get_url().await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::{ElementHandle, PageSession};
