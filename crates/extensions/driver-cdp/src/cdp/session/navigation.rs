//! Navigation operations for CDP page session.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::NavigationHistory;

use super::core::PageSession;

impl PageSession {
    /// Start navigating to `url` and return the frame id. Does not wait for load.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        debug!("Navigating to {}", url);
        Ok(frame_id)
    }

    /// `document.readyState` of the main frame.
    pub async fn ready_state(&self) -> Result<String, CdpError> {
        let result = self.evaluate("document.readyState").await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CdpError::InvalidResponse("readyState is not a string".to_string()))
    }

    pub async fn navigation_history(&self) -> Result<NavigationHistory, CdpError> {
        let history = self.call("Page.getNavigationHistory", None).await?;
        Ok(serde_json::from_value(history)?)
    }

    /// Move `offset` entries through history. Returns `false` when there is
    /// no such entry.
    pub async fn traverse_history(&self, offset: isize) -> Result<bool, CdpError> {
        let history = self.navigation_history().await?;
        let Some(entry) = history.entry_at_offset(offset) else {
            debug!("No history entry at offset {}", offset);
            return Ok(false);
        };

        self.call(
            "Page.navigateToHistoryEntry",
            Some(json!({"entryId": entry.id})),
        )
        .await?;
        debug!("Navigating through history to {}", entry.url);
        Ok(true)
    }

    pub async fn go_back(&self) -> Result<bool, CdpError> {
        self.traverse_history(-1).await
    }

    pub async fn go_forward(&self) -> Result<bool, CdpError> {
        self.traverse_history(1).await
    }

    pub async fn get_url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }

    pub async fn get_title(&self) -> Result<String, CdpError> {
        let result = self.evaluate("document.title").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}
