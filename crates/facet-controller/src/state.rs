//! The controller's read model.

use facet_core::{SearchQuery, SearchResult};

/// Request-lifecycle phase.
///
/// `Idle` is the pre-first-fetch state at mount; every intent from
/// `Loaded`/`Error` re-enters `Loading`. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Snapshot of everything the presentation layer may read.
///
/// Replaced wholesale on every transition; presentation must not mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    /// The committed query, mirroring the URL.
    pub query: SearchQuery,
    /// Uncommitted text edits, ahead of `query.text` until debounce expiry.
    pub text_draft: String,
    /// The last successfully fetched result page.
    pub result: SearchResult,
    /// Current lifecycle phase.
    pub phase: Phase,
    /// User-facing message while `phase == Error`.
    pub error: Option<String>,
}

impl ControllerState {
    pub(crate) fn at_mount(query: SearchQuery) -> Self {
        Self {
            text_draft: query.text.clone(),
            query,
            result: SearchResult::default(),
            phase: Phase::Idle,
            error: None,
        }
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Whether `result` reflects the committed query.
    pub fn is_loaded(&self) -> bool {
        self.phase == Phase::Loaded
    }
}
