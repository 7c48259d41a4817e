//! Injected capabilities: the remote search service and the URL/history
//! writer.
//!
//! Both are modeled as explicit collaborators rather than ambient globals
//! so the controller stays testable and the URL a swappable resource.

use async_trait::async_trait;

use facet_core::normalize::RawSearchResponse;
use facet_core::{QueryParams, SearchQuery};

use crate::cancel::CancelSignal;
use crate::error::SearchError;

/// The remote search capability.
///
/// Implementations receive a cancellation signal and may abort early with
/// [`SearchError::Cancelled`]. Honoring the signal is optional: the
/// controller discards stale responses on arrival either way.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(
        &self,
        query: &SearchQuery,
        cancel: CancelSignal,
    ) -> Result<RawSearchResponse, SearchError>;
}

/// The URL/history write capability.
///
/// `replace` rewrites the current query string without pushing a history
/// entry, so rapid typing does not spam browser history. The controller is
/// the sole writer during its own commits; external navigation reaches it
/// through its navigation channel instead.
pub trait HistoryWriter: Send + Sync {
    fn replace(&self, params: &QueryParams);
}
