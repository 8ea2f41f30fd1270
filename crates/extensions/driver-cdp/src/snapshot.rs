//! Snapshots of a live page.

use ariaref_config::SnapshotConfig;
use ariaref_snapshot::{AriaSnapshotter, CaptureError, Document, HtmlRoleResolver, RoleResolver};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::cdp::CdpError;
use crate::page::BrowserPage;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("page capture failed: {0}")]
    Page(#[from] CdpError),

    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Snapshot text handed to the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub text: String,
    pub ref_count: u32,
    pub url: String,
}

/// Captures the DOM, renders the snapshot and writes the ref markers back.
///
/// Every call invalidates the refs of the previous one: all markers on the
/// page are stripped before the new ones are set.
pub struct PageSnapshotter<R: RoleResolver = HtmlRoleResolver> {
    inner: AriaSnapshotter<R>,
}

impl Default for PageSnapshotter {
    fn default() -> Self {
        Self {
            inner: AriaSnapshotter::default(),
        }
    }
}

impl From<&SnapshotConfig> for PageSnapshotter {
    fn from(config: &SnapshotConfig) -> Self {
        Self {
            inner: AriaSnapshotter::from(config),
        }
    }
}

impl<R: RoleResolver> PageSnapshotter<R> {
    pub fn new(inner: AriaSnapshotter<R>) -> Self {
        Self { inner }
    }

    pub async fn snapshot<P>(&self, page: &P) -> Result<PageSnapshot, SnapshotError>
    where
        P: BrowserPage + ?Sized,
    {
        let payload = page.capture().await?;
        let (mut doc, url) = Document::from_capture_json(&payload)?;
        debug!(nodes = doc.len(), "captured page");

        let rendered = self.inner.snapshot(&mut doc);
        page.commit_markers(&doc.marker_writes()).await?;

        let url = match url {
            Some(url) => url,
            None => page.url().await?,
        };

        Ok(PageSnapshot {
            text: rendered.text,
            ref_count: rendered.ref_count,
            url,
        })
    }
}
