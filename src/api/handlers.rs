//! API request handlers

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::routes::AppState;
use crate::types::Expense;

/// Fields every create request must carry, checked in this order.
const REQUIRED_FIELDS: [&str; 4] = ["amount", "description", "category", "date"];

// Request bodies

/// Wire shape of a create request. `amount` may arrive as a JSON number or
/// a numeric string and must be strictly positive.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateExpenseRequest {
    /// Amount, as a number or numeric string; must be > 0
    #[schema(value_type = f64)]
    pub amount: Value,
    /// Free-text description
    pub description: String,
    /// Free-text category
    pub category: String,
    /// Date text, stored verbatim
    pub date: String,
}

// Response types

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
}

type CreateError = (StatusCode, Json<ErrorResponse>);

// Handlers

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// List all expenses in insertion order
#[utoipa::path(
    get,
    path = "/expenses",
    responses(
        (status = 200, description = "All expense records", body = [Expense])
    ),
    tag = "expenses"
)]
pub async fn list_expenses(State(state): State<AppState>) -> Json<Vec<Expense>> {
    Json(state.store.list().await)
}

/// Create a new expense
#[utoipa::path(
    post,
    path = "/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense created", body = Expense),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Malformed body or internal error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
pub async fn create_expense(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Expense>), CreateError> {
    // Decode manually: malformed payloads collapse into a generic 500, per
    // the endpoint contract, instead of the extractor's own 400/415.
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Failed to decode expense payload: {}", e);
        internal_error()
    })?;

    // First missing field wins; remaining fields are not checked.
    for field in REQUIRED_FIELDS {
        if is_missing(payload.get(field)) {
            return Err(missing_field(field));
        }
    }

    let amount = match payload.get("amount").and_then(parse_amount) {
        Some(amount) if amount > 0.0 => amount,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Amount must be a positive number".into(),
                }),
            ))
        }
    };

    let expense = state
        .store
        .append(
            amount,
            text_field(&payload, "description"),
            text_field(&payload, "category"),
            text_field(&payload, "date"),
        )
        .await;
    tracing::debug!("Created expense {}", expense.id);

    Ok((StatusCode::CREATED, Json(expense)))
}

/// CORS preflight: 200 with an empty body, no further processing.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback for unsupported methods on /expenses.
pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, POST")],
        Json(MessageResponse {
            message: format!("Method {method} Not Allowed"),
        }),
    )
}

// Validation helpers

/// A field is missing when the key is absent, null, or an empty string.
/// A numeric zero is present; it fails the positive-amount check instead.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn missing_field(name: &str) -> CreateError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!("Missing required field: {name}"),
        }),
    )
}

fn internal_error() -> CreateError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Failed to parse request body or internal error".into(),
        }),
    )
}

/// Copy a validated field verbatim. Non-string values keep their JSON text.
fn text_field(payload: &Value, name: &str) -> String {
    match payload.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        // Unreachable: presence is validated before fields are copied
        None => String::new(),
    }
}

/// Parse an amount from a JSON number or numeric string. Strings parse
/// strictly; trailing garbage is rejected rather than salvaged.
fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|a| a.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        assert_eq!(parse_amount(&json!(25)), Some(25.0));
        assert_eq!(parse_amount(&json!("19.99")), Some(19.99));
        assert_eq!(parse_amount(&json!(" 7.5 ")), Some(7.5));
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        assert_eq!(parse_amount(&json!("abc")), None);
        assert_eq!(parse_amount(&json!("25.5abc")), None);
        assert_eq!(parse_amount(&json!(true)), None);
        assert_eq!(parse_amount(&json!([1, 2])), None);
        assert_eq!(parse_amount(&json!("inf")), None);
    }

    #[test]
    fn missing_covers_absent_null_and_empty_string() {
        let payload = json!({"description": null, "category": "", "date": "2024-01-01"});

        assert!(is_missing(payload.get("amount")));
        assert!(is_missing(payload.get("description")));
        assert!(is_missing(payload.get("category")));
        assert!(!is_missing(payload.get("date")));
    }

    #[test]
    fn zero_amount_counts_as_present() {
        let payload = json!({"amount": 0});
        assert!(!is_missing(payload.get("amount")));
    }

    #[test]
    fn error_helpers_produce_contract_responses() {
        let (status, Json(body)) = missing_field("amount");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Missing required field: amount");

        let (status, Json(body)) = internal_error();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to parse request body or internal error");
    }

    #[test]
    fn text_field_copies_strings_verbatim() {
        let payload = json!({"description": "  padded  ", "category": 42});
        assert_eq!(text_field(&payload, "description"), "  padded  ");
        assert_eq!(text_field(&payload, "category"), "42");
    }
}
