//! Request-lifecycle controller for faceted search.
//!
//! This crate owns the orchestration half of the search stack:
//!
//! - **Debounce**: generic last-write-wins debouncing of rapidly changing
//!   values (free-text input)
//! - **Cancel**: cooperative cancellation token pair handed to in-flight
//!   requests
//! - **Backend**: the injected network and URL/history capabilities
//! - **Controller**: the event loop that keeps the canonical query, the
//!   URL, and the fetched results consistent
//!
//! The controller guarantees last-committed-query-wins: for a sequence of
//! committed queries, at most the most recent one's response is ever
//! applied, no matter in which order the requests complete.

pub mod backend;
pub mod cancel;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod state;

pub use backend::{HistoryWriter, SearchBackend};
pub use cancel::{CancelHandle, CancelSignal};
pub use config::ControllerConfig;
pub use controller::{Intent, SearchController, SearchHandle};
pub use error::SearchError;
pub use state::{ControllerState, Phase};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::backend::{HistoryWriter, SearchBackend};
    pub use crate::cancel::{CancelHandle, CancelSignal};
    pub use crate::config::ControllerConfig;
    pub use crate::controller::{Intent, SearchController, SearchHandle};
    pub use crate::error::SearchError;
    pub use crate::state::{ControllerState, Phase};

    pub use facet_core::prelude::*;
}
