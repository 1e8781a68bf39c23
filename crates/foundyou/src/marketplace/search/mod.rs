//! Search page state: filter form, listing store, pager, and the data source boundary.

pub mod criteria;
mod directory;
pub mod listing;
pub mod pagination;
pub mod session;
pub mod source;
pub mod views;

pub use criteria::{
    canonical_skill, CriteriaError, FilterCriteria, RateRange, SearchFilter, SKILL_VOCABULARY,
};
pub use directory::{SearchRequest, TalentDirectory};
pub use listing::{ListingSnapshot, ListingStore, PendingRefresh, RefreshOutcome};
pub use pagination::Pagination;
pub use session::SearchSession;
pub use source::{
    DataSourceError, FixtureDataSource, ListingMode, ListingPage, ListingQuery, RefreshTrigger,
    SimulatedLatency, TalentDataSource, PAGE_SIZE,
};
pub use views::{ListingView, ProfileView, TalentCardView};
