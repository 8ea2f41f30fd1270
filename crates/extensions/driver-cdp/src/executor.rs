//! Action execution against a live page.

use std::sync::Arc;
use std::time::Duration;

use ariaref_config::StabilizationConfig;
use ariaref_protocols::{ActionError, ActionKind, ActionRequest, BrowserActionError, PageAction};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::page::BrowserPage;
use crate::resolver::{self, ResolveError};
use crate::stabilize::{Stabilizer, cancellable};

/// Executes planner actions on one page.
///
/// Element actions resolve their ref against the current DOM before anything
/// else is checked. Actions that may navigate are followed by stabilization
/// before `perform` returns.
pub struct ActionExecutor<P: BrowserPage> {
    page: Arc<P>,
    stabilizer: Stabilizer,
    cancel: CancellationToken,
}

impl<P: BrowserPage> ActionExecutor<P> {
    pub fn new(page: Arc<P>) -> Self {
        Self {
            page,
            stabilizer: Stabilizer::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_stabilization(mut self, config: StabilizationConfig) -> Self {
        self.stabilizer = Stabilizer::new(config);
        self
    }

    /// Use `token` to abandon waits and stabilization.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn page(&self) -> &Arc<P> {
        &self.page
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Resolve `aria_ref` to its live element.
    pub async fn resolve(&self, action: ActionKind, aria_ref: &str) -> Result<P::Element, ActionError> {
        match resolver::resolve(self.page.as_ref(), aria_ref).await {
            Ok(element) => Ok(element),
            Err(ResolveError::InvalidRef(e)) => Err(e.into()),
            Err(ResolveError::Page(e)) => Err(BrowserActionError::with_cause(
                action,
                format!("could not look up ref {}: {}", aria_ref, e),
                e,
            )
            .into()),
        }
    }

    pub async fn perform(&self, request: &ActionRequest) -> Result<(), ActionError> {
        let kind = request.action;
        if self.cancel.is_cancelled() {
            return Err(ActionError::Cancelled { action: kind });
        }
        debug!(action = %kind, aria_ref = ?request.aria_ref, "performing action");

        let element = if kind.targets_element() {
            let aria_ref = request
                .aria_ref
                .as_deref()
                .filter(|r| !r.is_empty())
                .ok_or_else(|| BrowserActionError::new(kind, format!("{} requires a ref", kind)))?;
            Some(self.resolve(kind, aria_ref).await?)
        } else {
            None
        };

        let action = PageAction::try_from(request)?;
        self.dispatch(&action, element.as_ref()).await?;

        if kind.stabilizes() {
            self.stabilizer
                .stabilize(self.page.as_ref(), kind, &self.cancel)
                .await?;
        }
        Ok(())
    }

    async fn dispatch(&self, action: &PageAction, element: Option<&P::Element>) -> Result<(), ActionError> {
        let kind = action.kind();
        let page = self.page.as_ref();

        let result = match action {
            PageAction::Click { .. } => page.click(target(kind, element)?).await,
            PageAction::Hover { .. } => page.hover(target(kind, element)?).await,
            PageAction::Fill { value, .. } => page.fill(target(kind, element)?, value).await,
            PageAction::Focus { .. } => page.focus(target(kind, element)?).await,
            PageAction::Check { .. } => page.set_checked(target(kind, element)?, true).await,
            PageAction::Uncheck { .. } => page.set_checked(target(kind, element)?, false).await,
            PageAction::Select { value, .. } => page.select_option(target(kind, element)?, value).await,
            PageAction::Enter { .. } => page.press_enter(target(kind, element)?).await,
            PageAction::FillAndEnter { value, .. } => {
                let element = target(kind, element)?;
                match page.fill(element, value).await {
                    Ok(()) => page.press_enter(element).await,
                    Err(e) => Err(e),
                }
            }
            PageAction::Wait { seconds } => {
                debug!(seconds, "waiting");
                cancellable(&self.cancel, kind, tokio::time::sleep(Duration::from_secs(*seconds))).await?;
                Ok(())
            }
            PageAction::Goto { url } => page.goto(url).await,
            PageAction::Back => page.go_back().await,
            PageAction::Forward => page.go_forward().await,
            PageAction::Extract | PageAction::Abort | PageAction::Done => {
                debug!(action = %kind, "signal action, nothing to do on the page");
                Ok(())
            }
        };

        result.map_err(|e| {
            BrowserActionError::with_cause(kind, format!("{}: {}", describe(action), e), e).into()
        })
    }
}

fn target<E>(kind: ActionKind, element: Option<&E>) -> Result<&E, BrowserActionError> {
    element.ok_or_else(|| BrowserActionError::new(kind, format!("{} requires a ref", kind)))
}

fn describe(action: &PageAction) -> String {
    match action {
        PageAction::Goto { url } => format!("could not navigate to {}", url),
        PageAction::Back => "could not go back".to_string(),
        PageAction::Forward => "could not go forward".to_string(),
        other => match other.aria_ref() {
            Some(aria_ref) => format!("could not {} {}", other.kind(), aria_ref),
            None => format!("could not {}", other.kind()),
        },
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
