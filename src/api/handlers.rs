//! HTTP request handlers for the Payslip Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{MONTHS_PER_YEAR, compute_annual_tax, generate_payslip, round_to_cents};
use crate::error::ValidationError;

use super::request::{PayeRequest, PayslipRequest};
use super::response::{ApiError, ApiErrorResponse, PayeResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslip", post(payslip_handler))
        .route("/paye", post(paye_handler))
        .with_state(state)
}

/// Handler for POST /payslip endpoint.
///
/// Accepts the payslip form fields and returns the generated payslip.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let as_of_year = request.as_of_year.unwrap_or_else(|| Utc::now().year());

    let start_time = Instant::now();
    match generate_payslip(&request.input, state.config().config(), as_of_year) {
        Ok(payslip) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                calculation_id = %payslip.calculation_id,
                tax_year = %payslip.tax_year,
                gross_pay = %payslip.result.gross_pay(),
                net_pay = %payslip.result.net_pay(),
                warnings = payslip.audit_trace.warnings.len(),
                duration_us = duration.as_micros(),
                "Payslip generated successfully"
            );
            json_response(StatusCode::OK, payslip)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payslip generation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /paye endpoint.
///
/// Returns the annual and monthly PAYE for an annual income and age.
async fn paye_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing PAYE request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if request.annual_income < Decimal::ZERO {
        let errors = [ValidationError::InvalidNumeric {
            field: "annualIncome".to_string(),
            message: "Annual Income must be a non-negative number".to_string(),
        }];
        warn!(correlation_id = %correlation_id, "Negative annual income");
        return error_response(ApiErrorResponse {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: ApiError::validation_error("Validation failed with 1 error(s)", &errors),
        });
    }

    let annual = compute_annual_tax(request.annual_income, request.age, state.config().paye());
    let annual_tax = round_to_cents(annual);
    let monthly_tax = round_to_cents(annual / Decimal::from(MONTHS_PER_YEAR));

    info!(
        correlation_id = %correlation_id,
        age = request.age,
        annual_tax = %annual_tax,
        "PAYE calculated"
    );

    json_response(
        StatusCode::OK,
        PayeResponse {
            annual_tax,
            monthly_tax,
        },
    )
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed serde error
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::malformed_json(body_text)
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
