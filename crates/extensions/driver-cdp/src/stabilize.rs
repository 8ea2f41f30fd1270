//! Post-action page stabilization.
//!
//! Three stages, in order:
//! 1. wait for the document to be parsed; any failure is ignored,
//! 2. wait for the full load within a time box; only the timeout is ignored,
//! 3. sleep for the settle delay.

use std::time::Duration;

use ariaref_config::StabilizationConfig;
use ariaref_protocols::{ActionError, ActionKind, BrowserActionError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::cdp::CdpError;
use crate::page::{BrowserPage, LoadState};

/// Poll `document.readyState` until it satisfies `state` or `timeout` elapses.
///
/// Reads that fail because the document is being swapped out count as not
/// ready yet. Transport failures end the wait.
pub async fn wait_for_load_state<P>(
    page: &P,
    state: LoadState,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<(), CdpError>
where
    P: BrowserPage + ?Sized,
{
    let poll = async {
        loop {
            match page.ready_state().await {
                Ok(ready_state) if state.is_reached(&ready_state) => return Ok::<(), CdpError>(()),
                Ok(_) => {}
                Err(e) if e.is_context_lost() => trace!(error = %e, "ready state unavailable, polling again"),
                Err(e) => return Err(e),
            }
            tokio::time::sleep(poll_interval).await;
        }
    };

    match tokio::time::timeout(timeout, poll).await {
        Ok(result) => result,
        Err(_) => Err(CdpError::Timeout(format!(
            "page did not reach {:?} within {}ms",
            state,
            timeout.as_millis()
        ))),
    }
}

/// Runs the stabilization stages after navigation-capable actions.
#[derive(Debug, Clone)]
pub struct Stabilizer {
    config: StabilizationConfig,
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self::new(StabilizationConfig::default())
    }
}

impl Stabilizer {
    pub fn new(config: StabilizationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StabilizationConfig {
        &self.config
    }

    /// Stabilize `page` after `action`. Returns `Cancelled` as soon as
    /// `cancel` fires; stages already passed are not undone.
    pub async fn stabilize<P>(
        &self,
        page: &P,
        action: ActionKind,
        cancel: &CancellationToken,
    ) -> Result<(), ActionError>
    where
        P: BrowserPage + ?Sized,
    {
        let poll = self.config.poll_interval();

        let parsed = wait_for_load_state(
            page,
            LoadState::DomContentLoaded,
            self.config.content_parsed_timeout(),
            poll,
        );
        match cancellable(cancel, action, parsed).await? {
            Ok(()) => {}
            Err(e) => debug!(%action, error = %e, "ignoring content-parsed wait failure"),
        }

        let loaded = wait_for_load_state(page, LoadState::Load, self.config.load_timeout(), poll);
        match cancellable(cancel, action, loaded).await? {
            Ok(()) => {}
            Err(e) if e.is_timeout() => {
                warn!(%action, timeout_ms = self.config.load_timeout_ms, "page load timed out, continuing");
            }
            Err(e) => {
                return Err(BrowserActionError::with_cause(action, "page failed while loading", e).into());
            }
        }

        cancellable(cancel, action, tokio::time::sleep(self.config.settle_delay())).await?;
        debug!(%action, "page stabilized");
        Ok(())
    }
}

/// Run `fut` unless `cancel` fires first.
pub(crate) async fn cancellable<F: Future>(
    cancel: &CancellationToken,
    action: ActionKind,
    fut: F,
) -> Result<F::Output, ActionError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(%action, "cancelled");
            Err(ActionError::Cancelled { action })
        }
        output = fut => Ok(output),
    }
}
