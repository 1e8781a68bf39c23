use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, warn};

use super::source::{
    DataSourceError, ListingPage, ListingQuery, RefreshTrigger, TalentDataSource,
};
use crate::marketplace::talent::TalentRecord;

/// Page-level listing state: the current records and whether a refresh is in flight.
///
/// Every refresh takes a ticket when it starts. Only the response holding the newest ticket
/// may replace the records, so a slow early response can never overwrite a later one.
pub struct ListingStore<S> {
    source: Arc<S>,
    state: Arc<Mutex<ListingState>>,
}

impl<S> Clone for ListingStore<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
        }
    }
}

#[derive(Debug, Default)]
struct ListingState {
    records: Vec<TalentRecord>,
    page: u32,
    total_pages: u32,
    total_matches: usize,
    loading: bool,
    issued: u64,
    search_ticket: Option<u64>,
    last_error: Option<String>,
}

/// Read-only copy of the listing for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingSnapshot {
    pub records: Vec<TalentRecord>,
    pub page: u32,
    pub total_pages: u32,
    pub total_matches: usize,
    pub loading: bool,
    pub last_error: Option<String>,
}

/// A refresh that has started but not landed.
#[derive(Debug, Clone)]
pub struct PendingRefresh {
    ticket: u64,
    query: ListingQuery,
}

impl PendingRefresh {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn query(&self) -> &ListingQuery {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer refresh started before this one landed; its response was dropped.
    Superseded,
}

impl<S> ListingStore<S>
where
    S: TalentDataSource + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(ListingState {
                page: 1,
                total_pages: 1,
                ..ListingState::default()
            })),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Start a refresh: take a ticket and raise the loading flag.
    pub fn begin(&self, query: ListingQuery) -> PendingRefresh {
        let mut state = self.state.lock().expect("listing mutex poisoned");
        state.issued += 1;
        state.loading = true;
        if query.trigger == RefreshTrigger::Search {
            state.search_ticket = Some(state.issued);
        }
        debug!(ticket = state.issued, page = query.page, trigger = ?query.trigger, "listing refresh started");
        PendingRefresh {
            ticket: state.issued,
            query,
        }
    }

    /// Await the data source for a started refresh and apply the response if it is still the
    /// newest one.
    pub async fn resolve(&self, pending: PendingRefresh) -> Result<RefreshOutcome, DataSourceError> {
        let result = self.source.search(&pending.query).await;
        let mut state = self.state.lock().expect("listing mutex poisoned");
        if state.search_ticket == Some(pending.ticket) {
            state.search_ticket = None;
        }

        if pending.ticket != state.issued {
            debug!(
                ticket = pending.ticket,
                newest = state.issued,
                "stale listing response discarded"
            );
            return Ok(RefreshOutcome::Superseded);
        }

        state.loading = false;
        match result {
            Ok(page) => {
                apply_page(&mut state, page);
                state.last_error = None;
                debug!(
                    ticket = pending.ticket,
                    records = state.records.len(),
                    "listing refreshed"
                );
                Ok(RefreshOutcome::Applied)
            }
            Err(err) => {
                warn!(ticket = pending.ticket, error = %err, "listing refresh failed");
                state.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn refresh(&self, query: ListingQuery) -> Result<RefreshOutcome, DataSourceError> {
        let pending = self.begin(query);
        self.resolve(pending).await
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().expect("listing mutex poisoned").loading
    }

    /// True while a search-triggered refresh has not landed. The page count it will
    /// report is unknown until then.
    pub fn is_searching(&self) -> bool {
        self.state
            .lock()
            .expect("listing mutex poisoned")
            .search_ticket
            .is_some()
    }

    pub fn total_pages(&self) -> u32 {
        self.state.lock().expect("listing mutex poisoned").total_pages
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        let state = self.state.lock().expect("listing mutex poisoned");
        ListingSnapshot {
            records: state.records.clone(),
            page: state.page,
            total_pages: state.total_pages,
            total_matches: state.total_matches,
            loading: state.loading,
            last_error: state.last_error.clone(),
        }
    }
}

fn apply_page(state: &mut ListingState, page: ListingPage) {
    state.records = page.records;
    state.page = page.page;
    state.total_pages = page.total_pages;
    state.total_matches = page.total_matches;
}
