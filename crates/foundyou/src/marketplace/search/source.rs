use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::criteria::{CriteriaError, FilterCriteria};
use crate::config::MarketplaceConfig;
use crate::marketplace::talent::{TalentId, TalentProfile, TalentRecord, TalentRoster};

/// Records per page when the listing is actually filtered.
pub const PAGE_SIZE: usize = 9;

/// Whether the fixture backend applies submitted criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingMode {
    /// Criteria are accepted and ignored; every page returns the full roster.
    Passthrough,
    /// Criteria filter the roster, which is then paged.
    Filtered,
}

impl ListingMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "passthrough" | "stub" => Some(Self::Passthrough),
            "filtered" | "filter" => Some(Self::Filtered),
            _ => None,
        }
    }
}

/// Artificial round-trip delays standing in for a network backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub search: Duration,
    pub page_change: Duration,
    pub profile: Duration,
}

impl SimulatedLatency {
    pub fn none() -> Self {
        Self {
            search: Duration::ZERO,
            page_change: Duration::ZERO,
            profile: Duration::ZERO,
        }
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            search: Duration::from_millis(800),
            page_change: Duration::from_millis(500),
            profile: Duration::from_millis(800),
        }
    }
}

/// What caused a listing refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTrigger {
    Search,
    PageChange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingQuery {
    pub criteria: FilterCriteria,
    pub page: u32,
    pub trigger: RefreshTrigger,
}

impl ListingQuery {
    pub fn search(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            page: 1,
            trigger: RefreshTrigger::Search,
        }
    }

    pub fn page(criteria: FilterCriteria, page: u32) -> Self {
        Self {
            criteria,
            page,
            trigger: RefreshTrigger::PageChange,
        }
    }
}

/// One page of results as returned by a data source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingPage {
    pub records: Vec<TalentRecord>,
    pub page: u32,
    pub total_pages: u32,
    pub total_matches: usize,
}

/// Backend boundary for the marketplace pages. Swap the fixture source for a real client
/// without touching the listing or page logic.
#[async_trait]
pub trait TalentDataSource: Send + Sync {
    async fn search(&self, query: &ListingQuery) -> Result<ListingPage, DataSourceError>;

    async fn fetch_profile(&self, id: &TalentId) -> Result<Option<TalentProfile>, DataSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error(transparent)]
    Criteria(#[from] CriteriaError),
    #[error("talent source unavailable: {0}")]
    Unavailable(String),
}

/// Serves the talent roster after a simulated delay.
#[derive(Debug, Clone)]
pub struct FixtureDataSource {
    roster: Arc<TalentRoster>,
    latency: SimulatedLatency,
    mode: ListingMode,
    total_pages: u32,
}

const PASSTHROUGH_TOTAL_PAGES: u32 = 3;

impl FixtureDataSource {
    pub fn new(roster: TalentRoster) -> Self {
        Self {
            roster: Arc::new(roster),
            latency: SimulatedLatency::default(),
            mode: ListingMode::Passthrough,
            total_pages: PASSTHROUGH_TOTAL_PAGES,
        }
    }

    pub fn from_config(roster: TalentRoster, config: &MarketplaceConfig) -> Self {
        Self::new(roster)
            .with_latency(config.latency)
            .with_mode(config.listing_mode)
            .with_total_pages(config.total_pages)
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_mode(mut self, mode: ListingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fixed page count reported in passthrough mode.
    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.total_pages = total_pages.max(1);
        self
    }

    pub fn mode(&self) -> ListingMode {
        self.mode
    }

    pub fn roster(&self) -> &TalentRoster {
        &self.roster
    }

    fn page_of(&self, query: &ListingQuery) -> ListingPage {
        match self.mode {
            ListingMode::Passthrough => ListingPage {
                records: self.roster.records().to_vec(),
                page: query.page.clamp(1, self.total_pages),
                total_pages: self.total_pages,
                total_matches: self.roster.len(),
            },
            ListingMode::Filtered => {
                let matches: Vec<&TalentRecord> = self
                    .roster
                    .records()
                    .iter()
                    .filter(|record| query.criteria.matches(record))
                    .collect();
                let total_pages = matches.len().div_ceil(PAGE_SIZE).max(1) as u32;
                let page = query.page.clamp(1, total_pages);
                let start = (page as usize - 1) * PAGE_SIZE;
                ListingPage {
                    records: matches
                        .iter()
                        .skip(start)
                        .take(PAGE_SIZE)
                        .map(|record| (*record).clone())
                        .collect(),
                    page,
                    total_pages,
                    total_matches: matches.len(),
                }
            }
        }
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl TalentDataSource for FixtureDataSource {
    async fn search(&self, query: &ListingQuery) -> Result<ListingPage, DataSourceError> {
        let delay = match query.trigger {
            RefreshTrigger::Search => self.latency.search,
            RefreshTrigger::PageChange => self.latency.page_change,
        };
        simulate(delay).await;
        Ok(self.page_of(query))
    }

    async fn fetch_profile(&self, id: &TalentId) -> Result<Option<TalentProfile>, DataSourceError> {
        simulate(self.latency.profile).await;
        Ok(self.roster.profile(id))
    }
}
