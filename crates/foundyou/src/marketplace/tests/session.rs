use std::sync::Arc;
use std::time::Duration;

use super::common::*;
use crate::marketplace::search::{FixtureDataSource, ListingMode, RefreshTrigger, SearchSession};
use crate::marketplace::talent::{TalentId, TalentRecord, TalentRoster};

fn unverified_roster(size: usize) -> TalentRoster {
    let template = TalentRoster::builtin().records()[0].clone();
    let records = (1..=size)
        .map(|index| TalentRecord {
            id: TalentId::new(index.to_string()),
            name: format!("Engineer {index}"),
            hourly_rate: 50,
            verified: false,
            ..template.clone()
        })
        .collect();
    TalentRoster::from_records(records)
}

#[tokio::test(start_paused = true)]
async fn opening_the_page_loads_the_first_page() {
    let source = Arc::new(ScriptedSource::new().with_delay(1, 800));
    let mut session = SearchSession::open(Arc::clone(&source), 3);

    assert!(session.is_loading());
    assert_eq!(session.pending_refreshes(), 1);

    let snapshot = session.settle().await;
    assert!(!snapshot.loading);
    assert_eq!(snapshot.records[0].id, source.expected_id(1));
    assert_eq!(session.pagination().total(), 3);
}

#[tokio::test(start_paused = true)]
async fn out_of_range_pages_issue_no_request() {
    let source = Arc::new(ScriptedSource::new());
    let mut session = SearchSession::open(Arc::clone(&source), 3);
    session.settle().await;

    assert!(!session.go_to(0));
    assert!(!session.go_to(4));
    assert!(!session.go_to(1));
    assert!(!session.previous_page());
    assert_eq!(session.pending_refreshes(), 0);
    assert_eq!(source.queries().len(), 1);

    assert!(session.go_to(3));
    assert!(!session.next_page());
    session.settle().await;
    assert_eq!(session.pagination().current(), 3);
    assert_eq!(source.queries().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn page_change_keeps_submitted_criteria_and_search_rewinds() {
    let source = Arc::new(ScriptedSource::new());
    let mut session = SearchSession::open(Arc::clone(&source), 3);
    session.settle().await;

    session.filter_mut().add_skill("Rust");
    let criteria = session.submit_search();
    session.settle().await;

    assert!(session.next_page());
    session.settle().await;
    assert_eq!(session.pagination().current(), 2);

    let queries = source.queries();
    let page_change = queries.last().expect("page change query");
    assert_eq!(page_change.trigger, RefreshTrigger::PageChange);
    assert_eq!(page_change.criteria, criteria);

    session.submit_search();
    assert_eq!(session.pagination().current(), 1);
    session.settle().await;
    let resubmitted = source.queries().last().cloned().expect("search query");
    assert_eq!(resubmitted.trigger, RefreshTrigger::Search);
    assert_eq!(resubmitted.page, 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_session_cancels_pending_refreshes() {
    let source = Arc::new(ScriptedSource::new().with_delay(1, 10_000));
    let session = SearchSession::open(Arc::clone(&source), 3);
    assert_eq!(session.pending_refreshes(), 1);
    assert!(Arc::strong_count(&source) > 1);

    drop(session);
    for _ in 0..10 {
        if Arc::strong_count(&source) == 1 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(Arc::strong_count(&source), 1);

    tokio::time::advance(Duration::from_secs(20)).await;
    assert!(source.queries().len() <= 1);
}

#[tokio::test(start_paused = true)]
async fn page_changes_wait_for_a_narrowing_search_to_land() {
    let source = Arc::new(
        FixtureDataSource::new(unverified_roster(27)).with_mode(ListingMode::Filtered),
    );
    let mut session = SearchSession::open(source, 1);
    assert!(session.is_searching());
    assert!(!session.go_to(2));

    session.settle().await;
    assert_eq!(session.pagination().total(), 3);

    session.filter_mut().set_verified_only(true);
    session.submit_search();
    assert!(session.is_searching());
    assert!(!session.go_to(3));
    assert_eq!(session.pagination().current(), 1);

    let snapshot = session.settle().await;
    assert!(!session.is_searching());
    assert_eq!((snapshot.page, snapshot.total_pages), (1, 1));
    assert_eq!(session.pagination().total(), 1);
    assert!(!session.go_to(3));
}

#[tokio::test(start_paused = true)]
async fn landed_search_page_count_is_adopted_without_settling() {
    let source = Arc::new(
        FixtureDataSource::new(unverified_roster(27)).with_mode(ListingMode::Filtered),
    );
    let mut session = SearchSession::open(source, 1);
    session.settle().await;

    session.filter_mut().set_verified_only(true);
    session.submit_search();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(!session.is_searching());

    assert!(!session.go_to(3));
    assert_eq!(session.pagination().total(), 1);
}
