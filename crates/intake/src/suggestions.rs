//! Debounced birthplace autocomplete.
//!
//! [`SuggestionGateway`] owns a single cancellable debounce timer. Every
//! keystroke cancels the pending timer and arms a new one; only when the
//! input has been quiet for the debounce window is a query sent.
//!
//! Once a query has been sent it is never cancelled. Instead every change
//! to the list (new query, selection, dismissal) advances a generation
//! counter, and a response is applied only if it was issued under the
//! current generation. A slow response to a superseded query is discarded.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use naamkaran_gateway::{PlaceSearch, PlaceSuggestion};

/// Inputs shorter than this never reach the geocoding service.
pub const MIN_QUERY_CHARS: usize = 3;

/// Default quiet period before a query is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Where a pointer-down landed, for click-away dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The birthplace text input.
    Input,
    /// The open suggestion panel.
    SuggestionPanel,
    /// Anywhere else on the page.
    Outside,
}

/// Current suggestion list, tagged with the generation it belongs to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionList {
    places: Vec<PlaceSuggestion>,
    generation: u64,
}

impl SuggestionList {
    pub fn places(&self) -> &[PlaceSuggestion] {
        &self.places
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// Debounced query-and-transform adapter over a [`PlaceSearch`].
pub struct SuggestionGateway<P: PlaceSearch> {
    search: Arc<P>,
    debounce: Duration,
    list: Arc<watch::Sender<SuggestionList>>,
    pending: Option<CancellationToken>,
}

impl<P: PlaceSearch> SuggestionGateway<P> {
    pub fn new(search: P, debounce: Duration) -> Self {
        let (list, _) = watch::channel(SuggestionList::default());
        Self {
            search: Arc::new(search),
            debounce,
            list: Arc::new(list),
            pending: None,
        }
    }

    /// Snapshot of the current suggestions.
    pub fn suggestions(&self) -> Vec<PlaceSuggestion> {
        self.list.borrow().places.clone()
    }

    /// Watch the suggestion list for changes.
    pub fn subscribe(&self) -> watch::Receiver<SuggestionList> {
        self.list.subscribe()
    }

    /// Whether a debounce timer is armed and has not fired yet.
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// React to new birthplace text.
    ///
    /// Short inputs clear the list immediately. Longer inputs (re)arm the
    /// debounce timer; the query fires with the latest text once the
    /// input has been quiet for the debounce window.
    ///
    /// The timer runs on the current Tokio runtime. Called outside one, the
    /// list is cleared and no query is sent.
    pub fn query(&mut self, text: &str) {
        self.cancel_pending();
        let generation = self.advance_generation();

        if text.chars().count() < MIN_QUERY_CHARS {
            self.clear_places();
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(text, "No Tokio runtime, place suggestions disabled");
            self.clear_places();
            return;
        };

        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let search = Arc::clone(&self.search);
        let list = Arc::clone(&self.list);
        let debounce = self.debounce;
        let text = text.to_string();

        runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(debounce) => {}
            }
            // The timer has fired; from here on the query runs to completion.
            token.cancel();
            fetch(search.as_ref(), &list, &text, generation).await;
        });
    }

    /// End the interaction: cancel any pending query, discard in-flight
    /// responses and empty the list.
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.advance_generation();
        self.clear_places();
    }

    /// Hide the list when the pointer goes down outside the input and panel.
    ///
    /// Returns whether the list was dismissed.
    pub fn pointer_down(&mut self, target: PointerTarget) -> bool {
        if target != PointerTarget::Outside {
            return false;
        }
        let had_places = !self.list.borrow().is_empty();
        self.clear();
        if had_places {
            tracing::debug!("Suggestions dismissed by click-away");
        }
        had_places
    }

    // ---- private helpers ----

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    fn advance_generation(&self) -> u64 {
        let mut generation = 0;
        self.list.send_if_modified(|list| {
            list.generation += 1;
            generation = list.generation;
            false
        });
        generation
    }

    fn clear_places(&self) {
        self.list.send_if_modified(|list| {
            if list.places.is_empty() {
                return false;
            }
            list.places.clear();
            true
        });
    }
}

impl<P: PlaceSearch> Drop for SuggestionGateway<P> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Run one query and publish its result if it is still current.
async fn fetch<P: PlaceSearch>(
    search: &P,
    list: &watch::Sender<SuggestionList>,
    text: &str,
    generation: u64,
) {
    tracing::debug!(text, generation, "Querying place suggestions");

    let places = match search.search(text).await {
        Ok(places) => places,
        Err(e) => {
            tracing::warn!(text, error = %e, "Place suggestion lookup failed");
            Vec::new()
        }
    };

    let applied = list.send_if_modified(|current| {
        if current.generation != generation {
            return false;
        }
        current.places = places;
        true
    });

    if !applied {
        tracing::debug!(text, generation, "Discarding superseded place suggestions");
    }
}
