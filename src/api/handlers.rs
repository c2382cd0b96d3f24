//! HTTP request handlers for the Shift Pay Engine API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler runs one pure calculation over the posted records; nothing is
//! stored.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Datelike;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_deductions, calculate_shift_income, estimate_month, iso_week_range,
    minutes_to_hours, month_range, recalculate_week,
};
use crate::error::{EngineError, EngineResult};
use crate::models::ShiftRecord;

use super::request::{
    DeductionRequest, MonthEstimateRequest, ShiftIncomeRequest, WeekRecalculationRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, HealthResponse, MonthEstimateResponse, WeekRecalculationResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/shifts/income", post(shift_income_handler))
        .route("/deductions", post(deductions_handler))
        .route("/weeks/recalculate", post(week_handler))
        .route("/months/estimate", post(month_handler))
        .with_state(state)
}

/// Handler for GET /health endpoint.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for POST /shifts/income endpoint.
///
/// Computes one shift's minutes and pay components.
async fn shift_income_handler(payload: Result<Json<ShiftIncomeRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift income request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let computed = calculate_shift_income(
        &request.shift,
        request.daily_holiday_allowance_share,
        request.night_allowance_enabled,
    );
    info!(
        correlation_id = %correlation_id,
        shift_id = %computed.id,
        gross_income = computed.earnings.gross_income,
        "Shift income calculated"
    );
    json_response(&computed)
}

/// Handler for POST /deductions endpoint.
///
/// Computes the deductions on a period's gross income.
async fn deductions_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeductionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing deduction request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = calculate_deductions(
        request.gross_income,
        minutes_to_hours(request.total_work_minutes),
        &request.salary,
        state.rates(),
    );
    info!(
        correlation_id = %correlation_id,
        gross_income = request.gross_income,
        total_deductions = result.total_deductions,
        "Deductions calculated"
    );
    json_response(&result)
}

/// Handler for POST /weeks/recalculate endpoint.
///
/// Recomputes the holiday allowance and every shift of one worker's ISO week.
async fn week_handler(payload: Result<Json<WeekRecalculationRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing week recalculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = validate_single_week(&request.shifts) {
        return error_response(correlation_id, err);
    }

    let start_time = Instant::now();
    let week = recalculate_week(&request.shifts, &request.salary);
    info!(
        correlation_id = %correlation_id,
        shifts_count = request.shifts.len(),
        weekly_holiday_allowance = ?week.as_ref().map(|w| w.weekly_holiday_allowance),
        duration_us = start_time.elapsed().as_micros(),
        "Week recalculated"
    );
    json_response(&WeekRecalculationResponse {
        pay_basis: request.salary.pay_basis,
        week,
    })
}

/// Handler for POST /months/estimate endpoint.
///
/// Estimates the month and each shift's net income.
async fn month_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthEstimateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing month estimate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = validate_single_month(&request.shifts, request.year, request.month).and_then(
        |()| {
            estimate_month(
                &request.shifts,
                &request.salary,
                request.year,
                request.month,
                state.rates(),
            )
        },
    );

    match result {
        Ok(estimate) => {
            info!(
                correlation_id = %correlation_id,
                shifts_count = request.shifts.len(),
                estimated_monthly_income = ?estimate.as_ref().map(|e| e.estimated_monthly_income),
                duration_us = start_time.elapsed().as_micros(),
                "Month estimated"
            );
            json_response(&MonthEstimateResponse { estimate })
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Rejects shifts that span several workers or ISO weeks.
fn validate_single_week(shifts: &[ShiftRecord]) -> EngineResult<()> {
    let Some(first) = shifts.first() else {
        return Ok(());
    };
    let week = iso_week_range(first.work_date);

    for shift in shifts {
        if shift.worker_id != first.worker_id {
            return Err(EngineError::InvalidShift {
                shift_id: shift.id.clone(),
                message: format!(
                    "belongs to worker '{}', expected '{}'",
                    shift.worker_id, first.worker_id
                ),
            });
        }
        if iso_week_range(shift.work_date) != week {
            return Err(EngineError::InvalidShift {
                shift_id: shift.id.clone(),
                message: format!("dated outside the week starting {}", week.0),
            });
        }
    }
    Ok(())
}

/// Rejects shifts that span several workers or fall outside the month.
fn validate_single_month(shifts: &[ShiftRecord], year: i32, month: u32) -> EngineResult<()> {
    month_range(year, month)?;

    let Some(first) = shifts.first() else {
        return Ok(());
    };
    for shift in shifts {
        if shift.worker_id != first.worker_id {
            return Err(EngineError::InvalidShift {
                shift_id: shift.id.clone(),
                message: format!(
                    "belongs to worker '{}', expected '{}'",
                    shift.worker_id, first.worker_id
                ),
            });
        }
        if shift.work_date.year() != year || shift.work_date.month() != month {
            return Err(EngineError::InvalidShift {
                shift_id: shift.id.clone(),
                message: format!("dated outside {}-{:02}", year, month),
            });
        }
    }
    Ok(())
}

fn json_response<T: Serialize>(body: &T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}
