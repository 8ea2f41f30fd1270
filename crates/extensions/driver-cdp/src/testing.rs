//! In-memory page for executor, resolver and snapshotter tests.

use std::collections::VecDeque;

use ariaref_snapshot::MarkerWrite;
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::cdp::CdpError;
use crate::page::BrowserPage;

#[derive(Debug, Clone, PartialEq)]
pub enum PageCall {
    Capture,
    CommitMarkers(Vec<MarkerWrite>),
    QueryMarker(String),
    Click(u64),
    Hover(u64),
    Fill(u64, String),
    Focus(u64),
    SetChecked(u64, bool),
    SelectOption(u64, String),
    PressEnter(u64),
    Goto(String),
    GoBack,
    GoForward,
    ReadyState,
    Url,
}

type ErrorFactory = Box<dyn Fn() -> CdpError + Send + Sync>;

/// Elements are capture ids; markers live in a table updated by
/// `commit_markers`. Ready states are served from a queue whose last entry
/// repeats (`complete` when empty).
pub struct FakePage {
    capture_json: Option<String>,
    url: String,
    markers: Mutex<Vec<(u64, String)>>,
    ready_states: Mutex<VecDeque<String>>,
    ready_state_failures: Mutex<usize>,
    ready_state_error: Option<ErrorFactory>,
    fail_queries: bool,
    fail_element_actions: bool,
    calls: Mutex<Vec<PageCall>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            capture_json: None,
            url: "https://example.test/".to_string(),
            markers: Mutex::new(Vec::new()),
            ready_states: Mutex::new(VecDeque::new()),
            ready_state_failures: Mutex::new(0),
            ready_state_error: None,
            fail_queries: false,
            fail_element_actions: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_capture(mut self, json: impl Into<String>) -> Self {
        self.capture_json = Some(json.into());
        self
    }

    pub fn with_marker(self, capture_id: u64, aria_ref: &str) -> Self {
        self.markers.lock().push((capture_id, aria_ref.to_string()));
        self
    }

    pub fn with_ready_states<const N: usize>(self, states: [&str; N]) -> Self {
        self.ready_states
            .lock()
            .extend(states.iter().map(|s| s.to_string()));
        self
    }

    /// Fail the first `count` ready-state reads with `error()`.
    pub fn failing_ready_state(
        mut self,
        count: usize,
        error: impl Fn() -> CdpError + Send + Sync + 'static,
    ) -> Self {
        *self.ready_state_failures.lock() = count;
        self.ready_state_error = Some(Box::new(error));
        self
    }

    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub fn failing_element_actions(mut self) -> Self {
        self.fail_element_actions = true;
        self
    }

    pub fn calls(&self) -> Vec<PageCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: PageCall) -> usize {
        self.calls.lock().iter().filter(|c| **c == call).count()
    }

    /// Calls that act on the page, without ref queries and ready-state polls.
    pub fn actions(&self) -> Vec<PageCall> {
        self.calls
            .lock()
            .iter()
            .filter(|c| !matches!(c, PageCall::ReadyState | PageCall::QueryMarker(_)))
            .cloned()
            .collect()
    }

    pub fn markers(&self) -> Vec<(u64, String)> {
        self.markers.lock().clone()
    }

    fn record(&self, call: PageCall) {
        self.calls.lock().push(call);
    }

    fn element_action(&self, call: PageCall) -> Result<(), CdpError> {
        self.record(call);
        if self.fail_element_actions {
            return Err(CdpError::ElementNotFound("element has no visible box".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserPage for FakePage {
    type Element = u64;

    async fn capture(&self) -> Result<String, CdpError> {
        self.record(PageCall::Capture);
        self.capture_json
            .clone()
            .ok_or_else(|| CdpError::InvalidResponse("capture script returned no payload".to_string()))
    }

    async fn commit_markers(&self, writes: &[MarkerWrite]) -> Result<(), CdpError> {
        self.record(PageCall::CommitMarkers(writes.to_vec()));
        *self.markers.lock() = writes
            .iter()
            .map(|w| (w.capture_id, w.aria_ref.clone()))
            .collect();
        Ok(())
    }

    async fn query_marker(&self, aria_ref: &str) -> Result<Vec<u64>, CdpError> {
        self.record(PageCall::QueryMarker(aria_ref.to_string()));
        if self.fail_queries {
            return Err(CdpError::SessionClosed);
        }
        Ok(self
            .markers
            .lock()
            .iter()
            .filter(|(_, r)| r == aria_ref)
            .map(|(id, _)| *id)
            .collect())
    }

    async fn click(&self, element: &u64) -> Result<(), CdpError> {
        self.element_action(PageCall::Click(*element))
    }

    async fn hover(&self, element: &u64) -> Result<(), CdpError> {
        self.element_action(PageCall::Hover(*element))
    }

    async fn fill(&self, element: &u64, value: &str) -> Result<(), CdpError> {
        self.element_action(PageCall::Fill(*element, value.to_string()))
    }

    async fn focus(&self, element: &u64) -> Result<(), CdpError> {
        self.element_action(PageCall::Focus(*element))
    }

    async fn set_checked(&self, element: &u64, checked: bool) -> Result<(), CdpError> {
        self.element_action(PageCall::SetChecked(*element, checked))
    }

    async fn select_option(&self, element: &u64, value: &str) -> Result<(), CdpError> {
        self.element_action(PageCall::SelectOption(*element, value.to_string()))
    }

    async fn press_enter(&self, element: &u64) -> Result<(), CdpError> {
        self.element_action(PageCall::PressEnter(*element))
    }

    async fn goto(&self, url: &str) -> Result<(), CdpError> {
        self.record(PageCall::Goto(url.to_string()));
        Ok(())
    }

    async fn go_back(&self) -> Result<(), CdpError> {
        self.record(PageCall::GoBack);
        Ok(())
    }

    async fn go_forward(&self) -> Result<(), CdpError> {
        self.record(PageCall::GoForward);
        Ok(())
    }

    async fn ready_state(&self) -> Result<String, CdpError> {
        self.record(PageCall::ReadyState);
        {
            let mut failures = self.ready_state_failures.lock();
            if *failures > 0 {
                *failures -= 1;
                if let Some(error) = &self.ready_state_error {
                    return Err(error());
                }
            }
        }
        let mut states = self.ready_states.lock();
        let state = if states.len() > 1 {
            states.pop_front()
        } else {
            states.front().cloned()
        };
        Ok(state.unwrap_or_else(|| "complete".to_string()))
    }

    async fn url(&self) -> Result<String, CdpError> {
        self.record(PageCall::Url);
        Ok(self.url.clone())
    }
}
