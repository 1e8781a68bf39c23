use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::warn;

use super::forms::{
    AuthFailure, AuthService, Authenticator, FormError, FormFlow, LoginDraft, OnboardingOptions,
    OnboardingWizard, ProfileDraft, Role, SignupDraft,
};
use super::search::{DataSourceError, SearchRequest, TalentDataSource, TalentDirectory};
use super::site::{HomeContent, SearchOptions};
use super::talent::TalentId;

/// Request-facing services shared by every marketplace handler.
pub struct Marketplace<S, A> {
    directory: TalentDirectory<S>,
    auth: AuthService<A>,
}

impl<S, A> Marketplace<S, A>
where
    S: TalentDataSource + 'static,
    A: Authenticator + 'static,
{
    pub fn new(source: Arc<S>, authenticator: Arc<A>) -> Self {
        Self {
            directory: TalentDirectory::new(source),
            auth: AuthService::new(authenticator),
        }
    }

    pub fn directory(&self) -> &TalentDirectory<S> {
        &self.directory
    }

    pub fn auth(&self) -> &AuthService<A> {
        &self.auth
    }
}

pub fn marketplace_router<S, A>(marketplace: Arc<Marketplace<S, A>>) -> Router
where
    S: TalentDataSource + 'static,
    A: Authenticator + 'static,
{
    Router::new()
        .route("/api/v1/site/home", get(home_handler))
        .route("/api/v1/search/options", get(search_options_handler))
        .route("/api/v1/talent/search", post(search_handler::<S, A>))
        .route("/api/v1/talent/:talent_id", get(profile_handler::<S, A>))
        .route("/api/v1/auth/login", post(login_handler::<S, A>))
        .route("/api/v1/auth/signup", post(signup_handler::<S, A>))
        .route("/api/v1/onboarding/options", get(onboarding_options_handler))
        .route("/api/v1/onboarding/:role", post(onboarding_handler))
        .with_state(marketplace)
}

async fn home_handler() -> Json<HomeContent> {
    Json(HomeContent::standard())
}

async fn search_options_handler() -> Json<SearchOptions> {
    Json(SearchOptions::catalog())
}

async fn onboarding_options_handler() -> Json<OnboardingOptions> {
    Json(OnboardingOptions::catalog())
}

pub(crate) async fn search_handler<S, A>(
    State(marketplace): State<Arc<Marketplace<S, A>>>,
    Json(request): Json<SearchRequest>,
) -> Response
where
    S: TalentDataSource + 'static,
    A: Authenticator + 'static,
{
    match marketplace.directory.search(request).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => data_source_failure(error),
    }
}

pub(crate) async fn profile_handler<S, A>(
    State(marketplace): State<Arc<Marketplace<S, A>>>,
    Path(talent_id): Path<String>,
) -> Response
where
    S: TalentDataSource + 'static,
    A: Authenticator + 'static,
{
    let id = TalentId(talent_id);
    match marketplace.directory.profile(&id).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "Engineer Not Found",
                "message": "The engineer profile you're looking for doesn't exist or has been removed.",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(error) => data_source_failure(error),
    }
}

pub(crate) async fn login_handler<S, A>(
    State(marketplace): State<Arc<Marketplace<S, A>>>,
    Json(draft): Json<LoginDraft>,
) -> Response
where
    S: TalentDataSource + 'static,
    A: Authenticator + 'static,
{
    let mut flow = FormFlow::new();
    match marketplace.auth.login(&mut flow, &draft).await {
        Ok(submission) => (StatusCode::OK, Json(submission)).into_response(),
        Err(failure) => auth_failure(failure),
    }
}

pub(crate) async fn signup_handler<S, A>(
    State(marketplace): State<Arc<Marketplace<S, A>>>,
    Json(draft): Json<SignupDraft>,
) -> Response
where
    S: TalentDataSource + 'static,
    A: Authenticator + 'static,
{
    let mut flow = FormFlow::new();
    match marketplace.auth.signup(&mut flow, &draft).await {
        Ok(submission) => (StatusCode::OK, Json(submission)).into_response(),
        Err(failure) => auth_failure(failure),
    }
}

pub(crate) async fn onboarding_handler(
    Path(role): Path<String>,
    Json(draft): Json<ProfileDraft>,
) -> Response {
    let Some(role) = Role::parse(&role) else {
        let payload = json!({ "error": format!("unknown role: {role}") });
        return (StatusCode::NOT_FOUND, Json(payload)).into_response();
    };

    let mut wizard = OnboardingWizard::new(role);
    match wizard.submit(&draft) {
        Ok(submission) => (StatusCode::OK, Json(submission)).into_response(),
        Err(error) => form_failure(error),
    }
}

fn form_failure(error: FormError) -> Response {
    match error {
        FormError::Invalid(errors) => {
            let payload = json!({ "errors": errors });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        FormError::AlreadySubmitted => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
    }
}

fn auth_failure(failure: AuthFailure) -> Response {
    match failure {
        AuthFailure::Form(error) => form_failure(error),
        AuthFailure::Backend { notice, source } => {
            let payload = json!({
                "error": notice.title,
                "message": notice.description,
                "detail": source.to_string(),
            });
            (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
        }
    }
}

fn data_source_failure(error: DataSourceError) -> Response {
    let status = match error {
        DataSourceError::Criteria(_) => StatusCode::BAD_REQUEST,
        DataSourceError::Unavailable(_) => {
            warn!(error = %error, "talent data source unavailable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
