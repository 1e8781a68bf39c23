use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::marketplace::forms::SimulatedAuthenticator;
use crate::marketplace::search::{
    DataSourceError, FixtureDataSource, ListingPage, ListingQuery, SimulatedLatency,
    TalentDataSource,
};
use crate::marketplace::talent::{TalentId, TalentProfile, TalentRoster};
use crate::marketplace::{marketplace_router, Marketplace};

/// Returns one roster record per page, after a per-page delay, and records every query.
pub(super) struct ScriptedSource {
    roster: TalentRoster,
    delays: HashMap<u32, Duration>,
    queries: Mutex<Vec<ListingQuery>>,
}

impl ScriptedSource {
    pub(super) fn new() -> Self {
        Self {
            roster: TalentRoster::builtin(),
            delays: HashMap::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn with_delay(mut self, page: u32, millis: u64) -> Self {
        self.delays.insert(page, Duration::from_millis(millis));
        self
    }

    pub(super) fn expected_id(&self, page: u32) -> TalentId {
        let records = self.roster.records();
        records[(page as usize - 1) % records.len()].id.clone()
    }

    pub(super) fn queries(&self) -> Vec<ListingQuery> {
        self.queries.lock().expect("queries mutex poisoned").clone()
    }
}

#[async_trait]
impl TalentDataSource for ScriptedSource {
    async fn search(&self, query: &ListingQuery) -> Result<ListingPage, DataSourceError> {
        self.queries
            .lock()
            .expect("queries mutex poisoned")
            .push(query.clone());
        if let Some(delay) = self.delays.get(&query.page) {
            tokio::time::sleep(*delay).await;
        }
        let records = self.roster.records();
        let record = records[(query.page as usize - 1) % records.len()].clone();
        Ok(ListingPage {
            records: vec![record],
            page: query.page,
            total_pages: 3,
            total_matches: 1,
        })
    }

    async fn fetch_profile(&self, id: &TalentId) -> Result<Option<TalentProfile>, DataSourceError> {
        Ok(self.roster.profile(id))
    }
}

pub(super) struct UnavailableSource;

#[async_trait]
impl TalentDataSource for UnavailableSource {
    async fn search(&self, _: &ListingQuery) -> Result<ListingPage, DataSourceError> {
        Err(DataSourceError::Unavailable("connection refused".to_string()))
    }

    async fn fetch_profile(&self, _: &TalentId) -> Result<Option<TalentProfile>, DataSourceError> {
        Err(DataSourceError::Unavailable("connection refused".to_string()))
    }
}

pub(super) fn instant_fixture_source() -> Arc<FixtureDataSource> {
    Arc::new(FixtureDataSource::new(TalentRoster::builtin()).with_latency(SimulatedLatency::none()))
}

pub(super) fn router_with_source<S>(source: Arc<S>) -> axum::Router
where
    S: TalentDataSource + 'static,
{
    marketplace_router(Arc::new(Marketplace::new(
        source,
        Arc::new(SimulatedAuthenticator),
    )))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
