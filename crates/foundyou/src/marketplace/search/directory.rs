use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::criteria::FilterCriteria;
use super::source::{DataSourceError, ListingQuery, RefreshTrigger, TalentDataSource};
use super::views::{ListingView, ProfileView};
use crate::marketplace::talent::TalentId;

/// Search request accepted by the HTTP API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Stateless front for a data source, used by request handlers.
pub struct TalentDirectory<S> {
    source: Arc<S>,
}

impl<S> TalentDirectory<S>
where
    S: TalentDataSource + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub async fn search(&self, request: SearchRequest) -> Result<ListingView, DataSourceError> {
        request.criteria.validate()?;

        let query = match request.page {
            Some(page) if page > 1 => ListingQuery::page(request.criteria, page),
            _ => ListingQuery::search(request.criteria),
        };
        if query.trigger == RefreshTrigger::Search {
            info!(criteria = ?query.criteria, "search submitted");
        }

        let page = self.source.search(&query).await?;
        Ok(ListingView::from(page))
    }

    pub async fn profile(&self, id: &TalentId) -> Result<Option<ProfileView>, DataSourceError> {
        let profile = self.source.fetch_profile(id).await?;
        Ok(profile.map(ProfileView::from))
    }
}
