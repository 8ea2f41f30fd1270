//! The page capability the snapshotter and executor drive.

use std::fmt::Debug;

use ariaref_snapshot::MarkerWrite;
use async_trait::async_trait;
use tracing::debug;

use crate::cdp::{CdpError, ElementHandle, PageSession};
use crate::scripts;

/// Document readiness a stabilization stage waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// HTML parsed (`DOMContentLoaded`): ready state `interactive` or `complete`.
    DomContentLoaded,
    /// Subresources loaded: ready state `complete`.
    Load,
}

impl LoadState {
    /// Whether a `document.readyState` value satisfies this state.
    pub fn is_reached(&self, ready_state: &str) -> bool {
        match self {
            LoadState::DomContentLoaded => matches!(ready_state, "interactive" | "complete"),
            LoadState::Load => ready_state == "complete",
        }
    }
}

/// A live browser page.
///
/// Element operations receive handles returned by [`query_marker`]; a handle
/// is only valid for the document it was found in.
///
/// [`query_marker`]: BrowserPage::query_marker
#[async_trait]
pub trait BrowserPage: Send + Sync {
    type Element: Clone + Send + Sync + Debug;

    /// Serialize the live DOM into the capture payload JSON.
    async fn capture(&self) -> Result<String, CdpError>;

    /// Strip all markers from the page, then apply `writes` to the nodes of
    /// the latest capture.
    async fn commit_markers(&self, writes: &[MarkerWrite]) -> Result<(), CdpError>;

    /// Every element, across open shadow roots and same-origin frames, whose
    /// marker attribute equals `aria_ref`.
    async fn query_marker(&self, aria_ref: &str) -> Result<Vec<Self::Element>, CdpError>;

    async fn click(&self, element: &Self::Element) -> Result<(), CdpError>;

    async fn hover(&self, element: &Self::Element) -> Result<(), CdpError>;

    async fn fill(&self, element: &Self::Element, value: &str) -> Result<(), CdpError>;

    async fn focus(&self, element: &Self::Element) -> Result<(), CdpError>;

    async fn set_checked(&self, element: &Self::Element, checked: bool) -> Result<(), CdpError>;

    async fn select_option(&self, element: &Self::Element, value: &str) -> Result<(), CdpError>;

    async fn press_enter(&self, element: &Self::Element) -> Result<(), CdpError>;

    /// Start navigating. Returns once the navigation is committed or fails.
    async fn goto(&self, url: &str) -> Result<(), CdpError>;

    async fn go_back(&self) -> Result<(), CdpError>;

    async fn go_forward(&self) -> Result<(), CdpError>;

    /// Current `document.readyState`.
    async fn ready_state(&self) -> Result<String, CdpError>;

    async fn url(&self) -> Result<String, CdpError>;
}

#[async_trait]
impl BrowserPage for PageSession {
    type Element = ElementHandle;

    async fn capture(&self) -> Result<String, CdpError> {
        let value = self.evaluate(&scripts::capture_expression()).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CdpError::InvalidResponse("capture script returned no payload".to_string()))
    }

    async fn commit_markers(&self, writes: &[MarkerWrite]) -> Result<(), CdpError> {
        let written = self
            .evaluate(&scripts::commit_markers_expression(writes)?)
            .await?;
        debug!(expected = writes.len(), written = ?written.as_u64(), "committed ref markers");
        Ok(())
    }

    async fn query_marker(&self, aria_ref: &str) -> Result<Vec<ElementHandle>, CdpError> {
        self.query_elements(&scripts::query_marker_expression(aria_ref)?)
            .await
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), CdpError> {
        self.click_element(element).await
    }

    async fn hover(&self, element: &ElementHandle) -> Result<(), CdpError> {
        self.hover_element(element).await
    }

    async fn fill(&self, element: &ElementHandle, value: &str) -> Result<(), CdpError> {
        self.fill_element(element, value).await
    }

    async fn focus(&self, element: &ElementHandle) -> Result<(), CdpError> {
        self.focus_element(element).await
    }

    async fn set_checked(&self, element: &ElementHandle, checked: bool) -> Result<(), CdpError> {
        self.set_element_checked(element, checked).await
    }

    async fn select_option(&self, element: &ElementHandle, value: &str) -> Result<(), CdpError> {
        self.select_element_option(element, value).await
    }

    async fn press_enter(&self, element: &ElementHandle) -> Result<(), CdpError> {
        self.press_enter_on(element).await
    }

    async fn goto(&self, url: &str) -> Result<(), CdpError> {
        self.navigate(url).await.map(|_| ())
    }

    async fn go_back(&self) -> Result<(), CdpError> {
        PageSession::go_back(self).await.map(|_| ())
    }

    async fn go_forward(&self) -> Result<(), CdpError> {
        PageSession::go_forward(self).await.map(|_| ())
    }

    async fn ready_state(&self) -> Result<String, CdpError> {
        PageSession::ready_state(self).await
    }

    async fn url(&self) -> Result<String, CdpError> {
        self.get_url().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_thresholds() {
        assert!(LoadState::DomContentLoaded.is_reached("interactive"));
        assert!(LoadState::DomContentLoaded.is_reached("complete"));
        assert!(!LoadState::DomContentLoaded.is_reached("loading"));
        assert!(!LoadState::Load.is_reached("interactive"));
        assert!(LoadState::Load.is_reached("complete"));
    }
}
