//! The search controller: canonical query state, URL synchronization, and
//! cancellation-safe fetch orchestration.
//!
//! The controller runs as a single task reacting to discrete events (user
//! intents, debounce expiry, fetch completion, external navigation), so
//! `ControllerState` is never mutated concurrently. Each commit replaces
//! the query, rewrites the URL, synchronously invalidates the in-flight
//! request's token, and issues a fresh request stamped with a generation
//! number. A completion whose generation is no longer current is discarded
//! on arrival, which gives last-committed-query-wins ordering regardless of
//! completion order.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use facet_core::codec;
use facet_core::normalize::{normalize, RawSearchResponse};
use facet_core::{FacetGroup, QueryParams, SearchQuery};

use crate::backend::{HistoryWriter, SearchBackend};
use crate::cancel::{self, CancelHandle};
use crate::config::ControllerConfig;
use crate::debounce::{self, Debouncer};
use crate::error::SearchError;
use crate::state::{ControllerState, Phase};

/// A presentation-layer intent.
#[derive(Debug, Clone)]
pub enum Intent {
    /// A keystroke: updates the draft, commits only after debounce expiry.
    SetText(String),
    /// Toggle one option in a facet group.
    ToggleFacet(FacetGroup, String),
    /// Jump to a page.
    SetPage(u32),
}

struct FetchDone {
    generation: u64,
    outcome: Result<RawSearchResponse, SearchError>,
}

/// Write/read-model handle to a running controller.
///
/// Dropping every handle tears the controller down: the in-flight request
/// is cancelled and any pending debounce commit is disarmed.
#[derive(Debug)]
pub struct SearchHandle {
    intents: mpsc::UnboundedSender<Intent>,
    state: watch::Receiver<ControllerState>,
    task: JoinHandle<()>,
}

impl SearchHandle {
    /// Update the text draft. The commit happens after the debounce
    /// interval, with the page reset to 1.
    pub fn set_text(&self, text: impl Into<String>) {
        let _ = self.intents.send(Intent::SetText(text.into()));
    }

    /// Toggle a facet option. Commits immediately with the page reset to 1.
    pub fn toggle_facet(&self, group: FacetGroup, id: impl Into<String>) {
        let _ = self.intents.send(Intent::ToggleFacet(group, id.into()));
    }

    /// Jump to a page. Commits immediately; no other field changes.
    pub fn set_page(&self, page: u32) {
        let _ = self.intents.send(Intent::SetPage(page));
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ControllerState {
        self.state.borrow().clone()
    }

    /// A watch receiver over state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.state.clone()
    }

    /// Tear the controller down and wait for its task to finish.
    pub async fn shutdown(self) {
        let SearchHandle { intents, state, task } = self;
        drop(intents);
        drop(state);
        let _ = task.await;
    }
}

/// The orchestrator. Constructed and driven via [`SearchController::spawn`].
pub struct SearchController {
    backend: Arc<dyn SearchBackend>,
    history: Arc<dyn HistoryWriter>,
    config: ControllerConfig,
    state_tx: watch::Sender<ControllerState>,
    debouncer: Debouncer<String>,
    completion_tx: mpsc::UnboundedSender<FetchDone>,
    generation: u64,
    in_flight: Option<CancelHandle>,
}

impl SearchController {
    /// Decode the initial URL, start the mount fetch, and run the event
    /// loop on a spawned task.
    ///
    /// `navigations` delivers externally triggered URL changes (browser
    /// back/forward); those are already-committed state and bypass both the
    /// debouncer and the history writer.
    pub fn spawn(
        backend: Arc<dyn SearchBackend>,
        history: Arc<dyn HistoryWriter>,
        initial: QueryParams,
        navigations: mpsc::UnboundedReceiver<QueryParams>,
        config: ControllerConfig,
    ) -> SearchHandle {
        let query = codec::decode(&initial);
        let (state_tx, state_rx) = watch::channel(ControllerState::at_mount(query));
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (debouncer, debounced_rx) = debounce::channel(config.debounce_interval);
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        let controller = Self {
            backend,
            history,
            config,
            state_tx,
            debouncer,
            completion_tx,
            generation: 0,
            in_flight: None,
        };

        let task = tokio::spawn(async move {
            controller
                .run(intent_rx, debounced_rx, completion_rx, navigations)
                .await;
        });

        SearchHandle {
            intents: intent_tx,
            state: state_rx,
            task,
        }
    }

    async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<Intent>,
        mut debounced: mpsc::UnboundedReceiver<String>,
        mut completions: mpsc::UnboundedReceiver<FetchDone>,
        mut navigations: mpsc::UnboundedReceiver<QueryParams>,
    ) {
        // Mount fetch for the URL-derived query.
        self.start_fetch();

        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => self.on_intent(intent),
                    // Every handle dropped: tear down.
                    None => break,
                },
                Some(text) = debounced.recv() => self.on_debounced_text(text),
                Some(done) = completions.recv() => self.on_fetch_done(done),
                Some(params) = navigations.recv() => self.on_navigated(params),
            }
        }

        self.abort_in_flight();
        self.debouncer.cancel();
    }

    fn query(&self) -> SearchQuery {
        self.state_tx.borrow().query.clone()
    }

    fn on_intent(&mut self, intent: Intent) {
        match intent {
            Intent::SetText(text) => {
                self.state_tx.send_modify(|s| s.text_draft = text.clone());
                self.debouncer.submit(text);
            }
            Intent::ToggleFacet(group, id) => {
                let next = self.query().toggled(group, &id);
                self.commit(next);
            }
            Intent::SetPage(page) => {
                let next = self.query().with_page(page);
                self.commit(next);
            }
        }
    }

    fn on_debounced_text(&mut self, text: String) {
        let (draft, committed) = {
            let state = self.state_tx.borrow();
            (state.text_draft.clone(), state.query.text.clone())
        };
        // A navigation may have replaced the draft after this value fired,
        // and an unchanged text needs no commit.
        if text != draft || text == committed {
            return;
        }
        let next = self.query().with_text(text);
        self.commit(next);
    }

    fn on_navigated(&mut self, params: QueryParams) {
        let next = codec::decode(&params);
        // The URL is already committed state: no debounce, no history write.
        self.debouncer.cancel();
        let changed = next != self.query();

        self.state_tx.send_modify(|s| {
            s.text_draft = next.text.clone();
            s.query = next.clone();
        });

        if changed {
            debug!("external navigation changed the query");
            self.start_fetch();
        }
    }

    /// Replace the canonical query and synchronize the URL, then refetch.
    fn commit(&mut self, next: SearchQuery) {
        if next == self.query() {
            return;
        }
        let params = codec::encode(&next);
        self.history.replace(&params);
        self.state_tx.send_modify(|s| s.query = next.clone());
        self.start_fetch();
    }

    fn start_fetch(&mut self) {
        // Invalidate the previous request synchronously at commit time.
        self.abort_in_flight();
        self.generation += 1;
        let generation = self.generation;

        let (handle, signal) = cancel::pair();
        self.in_flight = Some(handle);

        let query = self.query();
        let backend = Arc::clone(&self.backend);
        let completion_tx = self.completion_tx.clone();
        debug!(generation, page = query.page, "issuing search request");

        tokio::spawn(async move {
            let outcome = backend.search(&query, signal).await;
            let _ = completion_tx.send(FetchDone { generation, outcome });
        });

        self.state_tx.send_modify(|s| {
            s.phase = Phase::Loading;
            s.error = None;
        });
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.cancel();
        }
    }

    fn on_fetch_done(&mut self, done: FetchDone) {
        if done.generation != self.generation {
            debug!(
                generation = done.generation,
                current = self.generation,
                "discarding stale response"
            );
            return;
        }
        self.in_flight = None;

        match done.outcome {
            Ok(raw) => {
                let result = normalize(raw);
                let max_page = result.max_page();
                self.state_tx.send_modify(|s| {
                    s.result = result.clone();
                    s.phase = Phase::Loaded;
                    s.error = None;
                });

                // The true total may have shrunk below the requested page;
                // one follow-up commit clamps it and triggers exactly one
                // more fetch cycle.
                let query = self.query();
                if query.page > max_page {
                    debug!(page = query.page, max_page, "clamping page past end of results");
                    self.commit(query.with_page(max_page));
                }
            }
            Err(err) if err.is_cancelled() => {
                // The backend aborted a request we still consider current;
                // treat it like any superseded outcome.
                debug!("current request reported cancellation; ignoring");
            }
            Err(err) => {
                warn!(error = %err, "search request failed");
                let message = self.config.error_message.clone();
                self.state_tx.send_modify(|s| {
                    s.phase = Phase::Error;
                    s.error = Some(message.clone());
                });
            }
        }
    }
}
