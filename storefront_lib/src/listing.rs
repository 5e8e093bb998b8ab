//! List view loading with last-write-wins sequencing.

use std::sync::{Arc, Mutex};

use storefront_api::types::Page;
use storefront_api::{Client, ListQuery, Location};

use crate::copy::ResourceCopy;
use crate::error::AdminError;

/// Hands out increasing tickets; only the latest one may apply its response.
///
/// Not synchronized on its own: it lives inside the controller's view state so
/// that issuing a ticket and recording its location happen under one lock.
#[derive(Clone, Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest == ticket
    }
}

/// What a finished load did to the view.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// The page is now the current one.
    Applied(Arc<Page<T>>),
    /// A newer load was issued while this one was in flight; its response
    /// was discarded.
    Stale,
}

impl<T> LoadOutcome<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, LoadOutcome::Stale)
    }

    pub fn page(&self) -> Option<&Page<T>> {
        match self {
            LoadOutcome::Applied(page) => Some(page),
            LoadOutcome::Stale => None,
        }
    }
}

struct ViewState<T> {
    sequencer: RequestSequencer,
    location: Location,
    current: Option<Arc<Page<T>>>,
}

/// Loads one resource's list view from the location.
///
/// Loads may overlap. Every load takes a ticket before its request goes out,
/// and a response is applied only if no newer load was started meanwhile.
pub struct ListController<R: ResourceCopy> {
    state: Mutex<ViewState<R::Item>>,
}

impl<R: ResourceCopy> ListController<R> {
    pub fn new(location: Location) -> Self {
        Self {
            state: Mutex::new(ViewState {
                sequencer: RequestSequencer::new(),
                location,
                current: None,
            }),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, ViewState<R::Item>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The location of the most recently issued load.
    pub fn location(&self) -> Location {
        self.state().location.clone()
    }

    /// The page last applied, if the last applied load succeeded.
    pub fn current(&self) -> Option<Arc<Page<R::Item>>> {
        self.state().current.clone()
    }

    /// Fetches the list for `location`. Always goes to the backend.
    ///
    /// A failed fetch clears the current page and returns
    /// [`AdminError::Fetch`], unless a newer load superseded it.
    pub async fn load(
        &self,
        client: &Client,
        location: &Location,
    ) -> Result<LoadOutcome<R::Item>, AdminError> {
        let ticket = {
            let mut state = self.state();
            state.location = location.clone();
            state.sequencer.issue()
        };

        let query = ListQuery::from_location(location);
        let result = client.list::<R>(&query).await;

        let mut state = self.state();
        if !state.sequencer.is_current(ticket) {
            tracing::debug!(
                "Discarding stale {} response for {} (ticket {})",
                R::PATH,
                location,
                ticket
            );
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(page) => {
                let page = Arc::new(page);
                state.current = Some(Arc::clone(&page));
                Ok(LoadOutcome::Applied(page))
            }
            Err(source) => {
                state.current = None;
                Err(AdminError::Fetch {
                    resource: R::NOUN.plural,
                    source,
                })
            }
        }
    }

    /// Re-runs the load for the most recently requested location.
    pub async fn refresh(&self, client: &Client) -> Result<LoadOutcome<R::Item>, AdminError> {
        let location = self.location();
        self.load(client, &location).await
    }
}
