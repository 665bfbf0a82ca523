use std::sync::Arc;

use axum::{routing::get, Json, Router};
use common::types::Health;
use service::{storage::JsonFileStore, EmployeeService, EMPLOYEES_PATH};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;

pub mod employees;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<EmployeeService<JsonFileStore>>,
}

impl AppState {
    pub fn new(store: JsonFileStore) -> Self {
        Self { employees: Arc::new(EmployeeService::new(Arc::new(store))) }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: employee CRUD, health and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let item_path = format!("{EMPLOYEES_PATH}/:id");

    let api = Router::new()
        .route("/health", get(health))
        .route(EMPLOYEES_PATH, get(employees::list).post(employees::create))
        .route(
            &item_path,
            get(employees::get).put(employees::update).delete(employees::delete),
        )
        .with_state(state);

    api.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
