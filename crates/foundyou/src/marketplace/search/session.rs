use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::criteria::{FilterCriteria, SearchFilter};
use super::listing::{ListingSnapshot, ListingStore, RefreshOutcome};
use super::pagination::Pagination;
use super::source::{DataSourceError, ListingQuery, TalentDataSource};

/// The search page: owns the filter form, the listing, and the pager.
///
/// Refreshes run as background tasks owned by the session. Dropping the session aborts any
/// that are still pending so nothing updates a page that is gone.
pub struct SearchSession<S> {
    filter: SearchFilter,
    pagination: Pagination,
    listing: ListingStore<S>,
    criteria: FilterCriteria,
    pending: JoinSet<Result<RefreshOutcome, DataSourceError>>,
}

impl<S> SearchSession<S>
where
    S: TalentDataSource + 'static,
{
    /// Open the page and kick off the initial load.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(source: Arc<S>, total_pages: u32) -> Self {
        let mut session = Self {
            filter: SearchFilter::new(),
            pagination: Pagination::new(total_pages),
            listing: ListingStore::new(source),
            criteria: FilterCriteria::default(),
            pending: JoinSet::new(),
        };
        session.spawn_refresh(ListingQuery::search(FilterCriteria::default()));
        session
    }

    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut SearchFilter {
        &mut self.filter
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Criteria of the last submitted search.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Submit the filter form. The listing starts loading immediately and the pager
    /// returns to the first page.
    pub fn submit_search(&mut self) -> FilterCriteria {
        let criteria = self.filter.submit();
        info!(
            query = %criteria.query,
            skills = ?criteria.skills,
            rate_low = criteria.rate_range.low(),
            rate_high = criteria.rate_range.high(),
            availability = ?criteria.availability,
            verified_only = criteria.verified_only,
            "search submitted"
        );
        self.criteria = criteria.clone();
        self.pagination.rewind();
        self.spawn_refresh(ListingQuery::search(criteria.clone()));
        criteria
    }

    /// Move to `page`. Out-of-range pages and the current page do nothing, and so does
    /// any page change while a submitted search has not landed yet.
    pub fn go_to(&mut self, page: u32) -> bool {
        if self.listing.is_searching() {
            debug!(page, "page change ignored while a search is in flight");
            return false;
        }
        self.pagination.set_total(self.listing.total_pages());
        if !self.pagination.go_to(page) {
            return false;
        }
        self.spawn_refresh(ListingQuery::page(self.criteria.clone(), page));
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to(self.pagination.current().saturating_add(1))
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to(self.pagination.current().saturating_sub(1))
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        self.listing.snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.listing.is_loading()
    }

    pub fn is_searching(&self) -> bool {
        self.listing.is_searching()
    }

    /// Number of refreshes still in flight.
    pub fn pending_refreshes(&self) -> usize {
        self.pending.len()
    }

    /// Wait for every in-flight refresh and adopt the page count the listing reports.
    pub async fn settle(&mut self) -> ListingSnapshot {
        while let Some(joined) = self.pending.join_next().await {
            match joined {
                Ok(Ok(_)) => {}
                Ok(Err(err)) => warn!(error = %err, "search refresh failed"),
                Err(err) => warn!(error = %err, "search refresh task aborted"),
            }
        }
        let snapshot = self.listing.snapshot();
        self.pagination.set_total(snapshot.total_pages);
        snapshot
    }

    fn spawn_refresh(&mut self, query: ListingQuery) {
        let pending = self.listing.begin(query);
        let listing = self.listing.clone();
        self.pending
            .spawn(async move { listing.resolve(pending).await });
    }
}
