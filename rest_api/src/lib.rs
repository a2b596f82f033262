// rest_api/src/lib.rs

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Error as AnyhowError};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

use lib::catalog::{DashboardSource, MockCatalog};
use lib::dashboard::{DashboardQuery, DashboardService};
use lib::filters::{FilterChange, MapViewport, SearchFilters, Selection};
use lib::navigation::{screen_table, Navigator, Screen, LANDING_ACTIONS};
use lib::submission::{
    FormKind, SimulatedBackend, SubmissionBackend, SubmissionError, SubmissionFlow,
    SubmissionReceipt,
};
use lib::validation::{
    BloodRequestForm, DonationForm, FieldOptions, FormSchema, ProfileForm, ValidationErrors,
};
use lib::LifeFlowError;
use models::{BloodType, ModelError};

pub mod config;
use crate::config::RestApiConfig;

#[derive(Debug, Error)]
pub enum RestApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Validation(ValidationErrors),
    #[error("{0}")]
    Conflict(String),
    #[error("Submission pipeline error: {0}")]
    Upstream(String),
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] AnyhowError),
    #[error("General error: {0}")]
    GeneralError(String),
}

impl From<SubmissionError> for RestApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Validation(errors) => RestApiError::Validation(errors),
            err @ SubmissionError::InFlight(_) => RestApiError::Conflict(err.to_string()),
            SubmissionError::Pipeline(msg) => RestApiError::Upstream(msg),
        }
    }
}

impl From<ModelError> for RestApiError {
    fn from(err: ModelError) -> Self {
        RestApiError::InvalidInput(err.to_string())
    }
}

impl From<LifeFlowError> for RestApiError {
    fn from(err: LifeFlowError) -> Self {
        match err {
            LifeFlowError::NotFound(what) => RestApiError::NotFound(what),
            LifeFlowError::Model(e) => e.into(),
            LifeFlowError::Submission(e) => e.into(),
            other => RestApiError::GeneralError(other.to_string()),
        }
    }
}

// Implement IntoResponse for RestApiError to convert it into an HTTP response
impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let (status, error_message, field_errors) = match self {
            RestApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg, None),
            RestApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {}", what), None),
            RestApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                errors.to_string(),
                Some(errors.errors),
            ),
            RestApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            RestApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, format!("Submission failed: {}", msg), None),
            RestApiError::SerdeJson(e) => (StatusCode::BAD_REQUEST, format!("JSON error: {}", e), None),
            RestApiError::Anyhow(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {}", e), None),
            RestApiError::GeneralError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        let mut body = json!({
            "status": "error",
            "message": error_message,
        });
        if let Some(errors) = field_errors {
            body["errors"] = json!(errors);
        }

        (status, Json(body)).into_response()
    }
}

/// The client decides where to go; the server only records the decision.
#[derive(Debug, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, screen: Screen) {
        info!(%screen, title = screen.title(), "Redirecting client");
    }
}

// Shared state for the Axum application
#[derive(Clone)]
pub struct AppState {
    dashboard: DashboardService,
    submissions: Arc<SubmissionFlow>,
}

impl AppState {
    pub fn new(source: Arc<dyn DashboardSource>, backend: Arc<dyn SubmissionBackend>) -> Self {
        AppState {
            dashboard: DashboardService::new(source),
            submissions: Arc::new(SubmissionFlow::new(backend)),
        }
    }

    /// Mock catalog plus the simulated backend with the configured delay.
    pub fn from_config(config: &RestApiConfig) -> Self {
        AppState::new(
            Arc::new(MockCatalog::new()),
            Arc::new(SimulatedBackend::new(config.submission_delay)),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    requests: Option<String>,
    donors: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UrgencyParams {
    urgency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityParams {
    availability: Option<String>,
}

/// Header naming the client whose form is being submitted. Submit controls
/// are kept per client; requests without it never collide with each other.
pub const CLIENT_HEADER: &str = "x-lifeflow-client";

#[derive(Debug, Default, Deserialize)]
pub struct MapParams {
    zoom: Option<u8>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDescriptor {
    kind: FormKind,
    screen: Screen,
    submit_label: &'static str,
    busy_label: &'static str,
    defaults: Value,
    required_fields: Vec<&'static str>,
    options: Vec<FieldOptions>,
}

fn describe_form<F: FormSchema>() -> Result<FormDescriptor, RestApiError> {
    let kind = F::KIND;
    Ok(FormDescriptor {
        kind,
        screen: kind.screen(),
        submit_label: kind.submit_label(),
        busy_label: kind.busy_label(),
        defaults: serde_json::to_value(F::default())?,
        required_fields: F::required_fields(),
        options: F::select_options(),
    })
}

async fn submit_form<F: FormSchema>(
    state: &AppState,
    client: &str,
    payload: Value,
) -> Result<SubmissionReceipt, RestApiError> {
    let form: F = serde_json::from_value(payload)?;
    let receipt = state.submissions.submit(client, &form, &TracingNavigator).await?;
    Ok(receipt)
}

fn client_key(headers: &HeaderMap) -> String {
    headers
        .get(CLIENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("anonymous-{}", Uuid::new_v4()))
}

fn parse_form_kind(raw: &str) -> Result<FormKind, RestApiError> {
    raw.parse::<FormKind>().map_err(RestApiError::from)
}

// Handler for the /api/v1/health endpoint
async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "message": "LifeFlow API is healthy" })))
}

// Handler for the /api/v1/version endpoint
async fn version_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "version": env!("CARGO_PKG_VERSION"), "api_level": 1 })),
    )
}

async fn screens_handler() -> Json<Value> {
    Json(json!({
        "screens": screen_table(),
        "landingActions": LANDING_ACTIONS,
    }))
}

async fn dashboard_handler(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<Value>, RestApiError> {
    let query = DashboardQuery {
        requests: Selection::parse(params.requests.as_deref())?,
        donors: Selection::parse(params.donors.as_deref())?,
    };
    let view = state.dashboard.overview(query).await?;
    Ok(Json(serde_json::to_value(view)?))
}

async fn blood_types_handler(State(state): State<AppState>) -> Result<Json<Value>, RestApiError> {
    let cards = state.dashboard.availability().await?;
    Ok(Json(serde_json::to_value(cards)?))
}

async fn blood_type_detail_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Value>, RestApiError> {
    let blood_type: BloodType = raw.parse()?;
    let detail = state.dashboard.blood_type_detail(blood_type).await?;
    Ok(Json(serde_json::to_value(detail)?))
}

async fn requests_handler(
    State(state): State<AppState>,
    Query(params): Query<UrgencyParams>,
) -> Result<Json<Value>, RestApiError> {
    let filter = Selection::parse(params.urgency.as_deref())?;
    let list = state.dashboard.requests(filter).await?;
    Ok(Json(serde_json::to_value(list)?))
}

async fn urgent_requests_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, RestApiError> {
    let cards = state.dashboard.urgent_requests().await?;
    Ok(Json(serde_json::to_value(cards)?))
}

async fn urgent_request_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, RestApiError> {
    let detail = state.dashboard.urgent_request_detail(&id).await?;
    Ok(Json(serde_json::to_value(detail)?))
}

async fn donors_handler(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<Value>, RestApiError> {
    let filter = Selection::parse(params.availability.as_deref())?;
    let list = state.dashboard.donors(filter).await?;
    Ok(Json(serde_json::to_value(list)?))
}

async fn locations_handler(
    State(state): State<AppState>,
    Query(params): Query<MapParams>,
) -> Result<Json<Value>, RestApiError> {
    let viewport = params.zoom.map(MapViewport::with_zoom).unwrap_or_default();
    let map = state.dashboard.map(viewport).await?;
    Ok(Json(serde_json::to_value(map)?))
}

async fn location_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, RestApiError> {
    let detail = state.dashboard.location_detail(&id).await?;
    Ok(Json(serde_json::to_value(detail)?))
}

fn search_state_body(filters: &SearchFilters) -> Result<Value, RestApiError> {
    Ok(json!({
        "filters": serde_json::to_value(filters)?,
        "summary": filters.to_string(),
    }))
}

/// A search bar edit: the client's current state plus one change.
#[derive(Debug, Deserialize)]
pub struct SearchUpdate {
    #[serde(default)]
    filters: SearchFilters,
    change: FilterChange,
}

// The search bar belongs to the client, so the server keeps none of it.
async fn search_filters_handler() -> Result<Json<Value>, RestApiError> {
    Ok(Json(search_state_body(&SearchFilters::default())?))
}

// Selections are echoed back only; no list is narrowed by them.
async fn apply_search_filter_handler(
    Json(update): Json<SearchUpdate>,
) -> Result<Json<Value>, RestApiError> {
    let SearchUpdate { mut filters, change } = update;
    filters.apply(change);
    debug!(summary = %filters, "Search bar updated");
    Ok(Json(search_state_body(&filters)?))
}

async fn form_defaults_handler(Path(kind): Path<String>) -> Result<Json<FormDescriptor>, RestApiError> {
    let descriptor = match parse_form_kind(&kind)? {
        FormKind::Profile => describe_form::<ProfileForm>()?,
        FormKind::BloodRequest => describe_form::<BloodRequestForm>()?,
        FormKind::Donation => describe_form::<DonationForm>()?,
    };
    Ok(Json(descriptor))
}

async fn submit_form_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<Json<SubmissionReceipt>, RestApiError> {
    let kind = parse_form_kind(&kind)?;
    let client = client_key(&headers);
    let result = match kind {
        FormKind::Profile => submit_form::<ProfileForm>(&state, &client, payload).await,
        FormKind::BloodRequest => {
            submit_form::<BloodRequestForm>(&state, &client, payload).await
        }
        FormKind::Donation => submit_form::<DonationForm>(&state, &client, payload).await,
    };
    if let Err(err) = &result {
        warn!(%kind, %client, error = %err, "Form submission rejected");
    }
    Ok(Json(result?))
}

async fn auxiliary_screens_handler() -> Json<Value> {
    let screens: Vec<Value> = Screen::ALL
        .iter()
        .map(|screen| json!({ "path": screen.path(), "title": screen.title() }))
        .collect();
    Json(json!({ "routes": screens }))
}

/// Route table mounted next to the API when `features.auxiliary_routes` is on.
pub fn auxiliary_routes() -> Router<AppState> {
    Router::new().route("/_aux/screens", get(auxiliary_screens_handler))
}

pub fn build_router(state: AppState, auxiliary: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api/v1/health", get(health_check_handler))
        .route("/api/v1/version", get(version_handler))
        .route("/api/v1/screens", get(screens_handler))
        .route("/api/v1/dashboard", get(dashboard_handler))
        .route("/api/v1/blood-types", get(blood_types_handler))
        .route("/api/v1/blood-types/:blood_type", get(blood_type_detail_handler))
        .route("/api/v1/requests", get(requests_handler))
        .route("/api/v1/urgent-requests", get(urgent_requests_handler))
        .route("/api/v1/urgent-requests/:id", get(urgent_request_detail_handler))
        .route("/api/v1/donors", get(donors_handler))
        .route("/api/v1/locations", get(locations_handler))
        .route("/api/v1/locations/:id", get(location_detail_handler))
        .route(
            "/api/v1/search/filters",
            get(search_filters_handler).post(apply_search_filter_handler),
        )
        .route("/api/v1/forms/:kind/defaults", get(form_defaults_handler))
        .route("/api/v1/forms/:kind", post(submit_form_handler));

    if auxiliary {
        info!("Mounting auxiliary routes");
        router = router.merge(auxiliary_routes());
    }

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serves `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<S>(listener: TcpListener, app: Router, shutdown: S) -> Result<(), AnyhowError>
where
    S: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("REST API server failed to start or run")
}

/// Binds the configured host and port. Hostnames are resolved, so
/// `localhost` works as well as an IP literal.
pub async fn bind_listener(config: &RestApiConfig) -> Result<TcpListener, AnyhowError> {
    TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to address: {}", config.listen_address()))
}

// Main function to start the REST API server
pub async fn start_server(
    config: RestApiConfig,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), AnyhowError> {
    let app = build_router(AppState::from_config(&config), config.auxiliary_routes);

    let listener = bind_listener(&config).await?;
    let addr = listener
        .local_addr()
        .context("Failed to read the bound address")?;
    info!("LifeFlow API listening on {}", addr);

    let shutdown_signal = async {
        if shutdown_rx.await.is_ok() {
            info!("Received shutdown signal.");
        }
    };

    serve(listener, app, shutdown_signal).await?;

    info!("REST API server stopped.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::validation::FieldError;

    fn status_of(err: RestApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn should_map_errors_to_status_codes() {
        assert_eq!(status_of(RestApiError::InvalidInput("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(LifeFlowError::NotFound("location loc9".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(SubmissionError::InFlight(FormKind::Donation).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(SubmissionError::Pipeline("timeout".into()).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(ModelError::UnknownBloodType("C+".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(LifeFlowError::ConfigurationError("missing port".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(LifeFlowError::Model(ModelError::unknown("urgency level", "urgent")).into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn should_map_validation_errors_to_unprocessable_entity() {
        let errors = ValidationErrors {
            errors: vec![FieldError {
                field: "consent",
                message: "You must agree to the terms and conditions",
            }],
        };
        let err: RestApiError = SubmissionError::Validation(errors).into();
        assert_eq!(status_of(err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn should_describe_request_form_defaults() {
        let descriptor = describe_form::<BloodRequestForm>().unwrap();
        assert_eq!(descriptor.screen, Screen::RequestBlood);
        assert_eq!(descriptor.submit_label, "Submit Request");
        assert_eq!(descriptor.defaults["units"], "1");
        assert_eq!(descriptor.defaults["urgencyLevel"], "medium");
        assert_eq!(descriptor.required_fields.len(), 9);
    }

    #[test]
    fn should_key_submissions_by_client_header() {
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_HEADER, " tab-42 ".parse().unwrap());
        assert_eq!(client_key(&headers), "tab-42");

        let anonymous = HeaderMap::new();
        let first = client_key(&anonymous);
        assert!(first.starts_with("anonymous-"));
        assert_ne!(first, client_key(&anonymous));
    }

    #[tokio::test]
    async fn should_bind_to_a_hostname() {
        let config = RestApiConfig::default().with_overrides(Some("localhost".to_string()), Some(0));
        let listener = bind_listener(&config).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[test]
    fn should_reject_unknown_form_kind() {
        assert!(matches!(parse_form_kind("feedback"), Err(RestApiError::NotFound(_))));
    }
}
