//! Ref to live element resolution.

use ariaref_protocols::InvalidRefError;
use thiserror::Error;
use tracing::debug;

use crate::cdp::CdpError;
use crate::page::BrowserPage;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The ref matched zero or several elements.
    #[error(transparent)]
    InvalidRef(#[from] InvalidRefError),

    /// The page could not be queried.
    #[error("ref query failed: {0}")]
    Page(#[from] CdpError),
}

/// Find the single live element marked with `aria_ref`.
///
/// The query runs against the current DOM, not the snapshot: an element that
/// was re-rendered since the snapshot no longer carries its marker and the
/// ref fails with [`InvalidRefError::NotFound`].
pub async fn resolve<P>(page: &P, aria_ref: &str) -> Result<P::Element, ResolveError>
where
    P: BrowserPage + ?Sized,
{
    let mut matches = page.query_marker(aria_ref).await?;
    debug!(aria_ref, matches = matches.len(), "resolved ref");

    match matches.len() {
        0 => Err(InvalidRefError::not_found(aria_ref).into()),
        1 => Ok(matches.remove(0)),
        n => Err(InvalidRefError::ambiguous(aria_ref, n).into()),
    }
}
