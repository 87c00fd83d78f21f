//! API route definitions

use axum::{
    http::{header, HeaderValue},
    middleware::map_response,
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    self, CreateExpenseRequest, ErrorResponse, HealthResponse, MessageResponse,
};
use crate::store::ExpenseStore;
use crate::types::Expense;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Spendlog API",
        version = "0.1.0",
        description = "Minimal in-memory expense tracking API"
    ),
    tags(
        (name = "expenses", description = "Expense listing and creation"),
        (name = "health", description = "Health checks")
    ),
    paths(
        handlers::health,
        handlers::list_expenses,
        handlers::create_expense,
    ),
    components(schemas(
        Expense,
        CreateExpenseRequest,
        ErrorResponse,
        MessageResponse,
        HealthResponse,
    ))
)]
pub struct ApiDoc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ExpenseStore>,
}

/// Add the permissive cross-origin headers to every response.
///
/// The endpoint contract requires all three headers on every branch, with
/// or without an Origin header on the request, so they are inserted
/// unconditionally here rather than through a negotiating CORS layer.
async fn cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let openapi = ApiDoc::openapi();

    Router::new()
        // The expense endpoint: GET lists, POST creates, OPTIONS answers
        // preflight, anything else gets 405 with a pinned Allow header.
        .route(
            "/expenses",
            get(handlers::list_expenses)
                .post(handlers::create_expense)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )

        // Health
        .route("/health", get(handlers::health))

        // OpenAPI spec and Swagger UI
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", openapi))

        .layer(map_response(cors_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
