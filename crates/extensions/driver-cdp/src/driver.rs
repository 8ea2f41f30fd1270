//! One page driven end to end: snapshot, check, perform.

use std::path::Path;
use std::sync::Arc;

use ariaref_config::{Config, ConfigError, ConfigLoader, ConfigValidator};
use ariaref_protocols::{ActionError, ActionRequest};
use ariaref_snapshot::PreflightValidator;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info};

use crate::cdp::{CdpClient, CdpError, PageSession};
use crate::executor::ActionExecutor;
use crate::snapshot::{PageSnapshot, PageSnapshotter, SnapshotError};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cdp(#[from] CdpError),
}

/// A CDP page with the snapshot, pre-flight and action layers on top.
///
/// Keeps the latest snapshot so proposed actions can be checked against the
/// text the planner actually saw.
pub struct AriaDriver {
    client: CdpClient,
    snapshotter: PageSnapshotter,
    validator: PreflightValidator,
    executor: ActionExecutor<PageSession>,
    last_snapshot: Mutex<Option<PageSnapshot>>,
}

impl AriaDriver {
    /// Load `ariaref.toml` from `path`, then [`connect`](Self::connect).
    pub async fn from_file(path: impl AsRef<Path>, url: Option<&str>) -> Result<Self, DriverError> {
        let config = ConfigLoader::load(path)?;
        Self::connect(&config, url).await
    }

    /// Connect to the configured browser and open a new page.
    pub async fn connect(config: &Config, url: Option<&str>) -> Result<Self, DriverError> {
        ConfigValidator::ensure_valid(config)?;
        let client = CdpClient::from_config(&config.browser).await?;
        let page = client.new_page(url).await?;
        info!(target_id = page.target_id(), "opened page");
        Ok(Self::assemble(config, client, page))
    }

    /// Connect to the configured browser and attach to an existing page.
    pub async fn attach(config: &Config, target_id: &str) -> Result<Self, DriverError> {
        ConfigValidator::ensure_valid(config)?;
        let client = CdpClient::from_config(&config.browser).await?;
        let page = client.attach_page(target_id).await?;
        info!(target_id, "attached to page");
        Ok(Self::assemble(config, client, page))
    }

    fn assemble(config: &Config, client: CdpClient, page: PageSession) -> Self {
        Self {
            client,
            snapshotter: PageSnapshotter::from(&config.snapshot),
            validator: PreflightValidator::from(&config.preflight),
            executor: ActionExecutor::new(Arc::new(page))
                .with_stabilization(config.stabilization.clone()),
            last_snapshot: Mutex::new(None),
        }
    }

    pub fn client(&self) -> &CdpClient {
        &self.client
    }

    pub fn page(&self) -> &Arc<PageSession> {
        self.executor.page()
    }

    pub fn executor(&self) -> &ActionExecutor<PageSession> {
        &self.executor
    }

    /// Take a fresh snapshot. Refs from earlier snapshots stop resolving.
    pub async fn snapshot(&self) -> Result<PageSnapshot, SnapshotError> {
        let snapshot = self.snapshotter.snapshot(self.page().as_ref()).await?;
        debug!(url = %snapshot.url, ref_count = snapshot.ref_count, "snapshot taken");
        *self.last_snapshot.lock() = Some(snapshot.clone());
        Ok(snapshot)
    }

    pub fn last_snapshot(&self) -> Option<PageSnapshot> {
        self.last_snapshot.lock().clone()
    }

    /// Pre-flight check of `request` against the latest snapshot text.
    pub fn check(&self, request: &ActionRequest) -> Option<String> {
        let guard = self.last_snapshot.lock();
        let text = guard.as_ref().map(|s| s.text.as_str()).unwrap_or("");
        self.validator.check(request, text)
    }

    /// Perform `request`. The latest snapshot is dropped since its refs may
    /// no longer describe the page.
    pub async fn perform(&self, request: &ActionRequest) -> Result<(), ActionError> {
        self.last_snapshot.lock().take();
        self.executor.perform(request).await
    }

    /// Close the page target.
    pub async fn close(self) -> Result<(), CdpError> {
        let target_id = self.page().target_id().to_string();
        self.client.close_page(&target_id).await
    }
}
