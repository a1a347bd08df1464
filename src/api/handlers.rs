//! HTTP request handlers for the PPh 21 engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_flat_tax, calculate_with_tables};
use crate::models::CalculationInput;

use super::request::{CalculationRequest, FlatTaxRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/flat-tax", post(flat_tax_handler))
        .route("/rate-tables", get(rate_tables_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    error.into_response()
}

/// Maps a JSON extraction failure onto a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /calculate.
///
/// Accepts a calculation request and returns the PPh 21 result wrapped in a
/// response envelope.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let input = match CalculationInput::try_from(request) {
        Ok(input) => input,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Request validation failed"
            );
            return error_response(err.into());
        }
    };

    let tables = state.tables();
    let start_time = Instant::now();
    let result = calculate_with_tables(&input, tables);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        ptkp_status = %result.ptkp_status,
        scheme = input.scheme.as_str(),
        annual_tax = %result.annual_tax,
        warnings = result.audit_trace.warnings.len(),
        duration_us,
        "Calculation completed successfully"
    );

    let response = CalculationResponse {
        calculation_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        tax_year: tables.metadata().year,
        duration_us,
        result,
    };
    json_response(StatusCode::OK, response)
}

/// Handler for POST /flat-tax.
async fn flat_tax_handler(payload: Result<Json<FlatTaxRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing flat tax request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if let Err(err) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Request validation failed"
        );
        return error_response(err.into());
    }

    let result = calculate_flat_tax(request.tax, request.base);
    info!(
        correlation_id = %correlation_id,
        rate = %result.rate,
        tax = %result.tax,
        "Flat tax calculated"
    );
    json_response(StatusCode::OK, result)
}

/// Handler for GET /rate-tables.
///
/// Returns the rate tables the server was started with.
async fn rate_tables_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.tables())
}
