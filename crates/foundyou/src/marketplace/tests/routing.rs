use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::marketplace::forms::SimulatedAuthenticator;
use crate::marketplace::router::search_handler;
use crate::marketplace::search::SearchRequest;
use crate::marketplace::Marketplace;

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn home_lists_features_and_calls_to_action() {
    let router = router_with_source(instant_fixture_source());
    let response = router.oneshot(get("/api/v1/site/home")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert_eq!(body["features"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["calls_to_action"][0]["target"], "/search");
    assert_eq!(body["calls_to_action"][1]["target"], "/signup");
}

#[tokio::test]
async fn option_catalogs_are_served() {
    let router = router_with_source(instant_fixture_source());

    let response = router
        .clone()
        .oneshot(get("/api/v1/search/options"))
        .await
        .expect("response");
    let body = read_json_body(response).await;
    assert_eq!(body["skills"].as_array().map(Vec::len), Some(43));
    assert_eq!(body["rate"], json!({ "min": 10, "max": 300, "step": 5, "default": [30, 150] }));

    let response = router
        .oneshot(get("/api/v1/onboarding/options"))
        .await
        .expect("response");
    let body = read_json_body(response).await;
    assert_eq!(body["team_sizes"][0], json!({ "value": "solo", "label": "Solo Founder" }));
    assert_eq!(body["expertise"].as_array().map(Vec::len), Some(9));
}

#[tokio::test]
async fn search_route_returns_the_unfiltered_page() {
    let router = router_with_source(instant_fixture_source());
    let payload = json!({
        "criteria": {
            "skills": ["React", "Node.js"],
            "rate_range": [40, 120],
            "verified_only": true,
        }
    });

    let response = router
        .oneshot(post_json("/api/v1/talent/search", payload))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["has_previous"], false);
    assert_eq!(body["records"].as_array().map(Vec::len), Some(9));
    assert_eq!(body["records"][0]["featured"], true);
}

#[tokio::test]
async fn search_route_honours_page() {
    let router = router_with_source(instant_fixture_source());
    let response = router
        .oneshot(post_json("/api/v1/talent/search", json!({ "page": 3 })))
        .await
        .expect("response");
    let body = read_json_body(response).await;
    assert_eq!(body["page"], 3);
    assert_eq!(body["has_next"], false);
    assert_eq!(body["has_previous"], true);
}

#[tokio::test]
async fn unknown_skill_is_a_bad_request() {
    let router = router_with_source(instant_fixture_source());
    let response = router
        .oneshot(post_json(
            "/api/v1/talent/search",
            json!({ "criteria": { "skills": ["COBOL"] } }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"].as_str().is_some_and(|message| message.contains("COBOL")));
}

#[tokio::test]
async fn search_handler_reports_unavailable_source() {
    let marketplace = Arc::new(Marketplace::new(
        Arc::new(UnavailableSource),
        Arc::new(SimulatedAuthenticator),
    ));

    let response = search_handler::<UnavailableSource, SimulatedAuthenticator>(
        State(marketplace),
        axum::Json(SearchRequest::default()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn profile_route_returns_detail_or_not_found() {
    let router = router_with_source(instant_fixture_source());

    let response = router
        .clone()
        .oneshot(get("/api/v1/talent/1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["name"], "Alex Johnson");
    assert_eq!(body["rate_label"], "$85/hr");
    assert!(body["reviews"].as_array().is_some_and(|reviews| !reviews.is_empty()));

    let response = router
        .oneshot(get("/api/v1/talent/999"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "Engineer Not Found");
}

#[tokio::test]
async fn login_route_validates_then_redirects_home() {
    let router = router_with_source(instant_fixture_source());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({ "email": "ada", "password": "short" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["errors"]["email"], "Please enter a valid email address");
    assert_eq!(body["errors"]["password"], "Password must be at least 8 characters");

    let response = router
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({ "email": "ada@example.com", "password": "correct horse" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["redirect"], "/");
    assert_eq!(body["redirect_after_ms"], 1000);
    assert_eq!(body["notice"]["description"], "Welcome back to FoundYou!");
}

#[tokio::test]
async fn signup_route_checks_confirmation() {
    let router = router_with_source(instant_fixture_source());

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/signup",
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "abcdefgh",
                "confirm_password": "abcdefgX",
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["errors"], json!({ "confirm_password": "Passwords don't match" }));

    let response = router
        .oneshot(post_json(
            "/api/v1/auth/signup",
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "abcdefgh",
                "confirm_password": "abcdefgh",
                "role": "hire",
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["redirect"], "/onboarding");
    assert_eq!(body["record"]["role"], "hire");
}

#[tokio::test]
async fn onboarding_route_checks_role_and_fields() {
    let router = router_with_source(instant_fixture_source());
    let engineer = json!({
        "role": "work",
        "title": "Dev",
        "expertise": "frontend",
        "bio": "Experienced frontend engineer.",
        "skills": "React, TypeScript",
        "hourly_rate": "85",
        "experience_level": "senior",
    });

    let response = router
        .clone()
        .oneshot(post_json("/api/v1/onboarding/work", engineer.clone()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["redirect"], "/profile/me");
    assert_eq!(body["record"]["skills"], json!(["React", "TypeScript"]));
    assert_eq!(body["notice"]["description"], "Your engineer profile is now live!");

    let response = router
        .clone()
        .oneshot(post_json("/api/v1/onboarding/hire", engineer.clone()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["errors"]["role"].is_string());

    let response = router
        .oneshot(post_json("/api/v1/onboarding/admin", engineer))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
