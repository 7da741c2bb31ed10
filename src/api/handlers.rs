//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    PayrollPeriod, PayslipInput, aggregate_adjustments, check_salary_breakup, compose_payslip,
    eligible_days, generate_payroll_run, month_working_days, resolve_overtime_rate,
};
use crate::error::EngineResult;

use super::request::{
    AdjustmentsRequest, EligibleDaysRequest, OvertimeRateRequest, PayrollRequest,
    SalaryBreakupRequest, WorkingDaysRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate/eligible-days", post(eligible_days_handler))
        .route("/calculate/salary-breakup", post(salary_breakup_handler))
        .route("/calculate/overtime-rate", post(overtime_rate_handler))
        .route("/calculate/adjustments", post(adjustments_handler))
        .route("/calculate/payslip", post(payslip_handler))
        .route("/calculate/working-days", post(working_days_handler))
        .route("/calculate/payroll", post(payroll_handler))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // serde's detailed message lives in the body text
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
            Err(ApiErrorResponse::bad_request(error))
        }
    }
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn respond<T: Serialize>(result: EngineResult<T>, correlation_id: Uuid) -> Response {
    match result {
        Ok(body) => json_ok(body),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EligibleDaysResponse {
    eligible_days: u32,
}

/// Handler for POST /calculate/eligible-days.
async fn eligible_days_handler(
    payload: Result<Json<EligibleDaysRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing eligible days request");

    let request = match parse_body(payload, correlation_id) {
        Ok(req) => req,
        Err(rejection) => return rejection.into_response(),
    };
    if !(1..=12).contains(&request.month) {
        return ApiErrorResponse::from(crate::error::EngineError::InvalidPeriod {
            month: request.month,
            year: request.year,
        })
        .into_response();
    }

    let days = eligible_days(
        request.hire_date,
        request.year,
        request.month,
        request.working_days,
    );
    json_ok(EligibleDaysResponse {
        eligible_days: days,
    })
}

/// Handler for POST /calculate/salary-breakup.
async fn salary_breakup_handler(
    payload: Result<Json<SalaryBreakupRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary breakup request");

    let request = match parse_body(payload, correlation_id) {
        Ok(req) => req,
        Err(rejection) => return rejection.into_response(),
    };
    let check = check_salary_breakup(
        request.basic_pay,
        request.hra,
        request.allowance,
        request.monthly_salary,
    );
    if !check.ok {
        info!(correlation_id = %correlation_id, diff = %check.diff, "Salary breakup mismatch");
    }
    json_ok(check)
}

/// Handler for POST /calculate/overtime-rate.
async fn overtime_rate_handler(
    State(state): State<AppState>,
    payload: Result<Json<OvertimeRateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing overtime rate request");

    let request = match parse_body(payload, correlation_id) {
        Ok(req) => req,
        Err(rejection) => return rejection.into_response(),
    };
    let settings = state.config().settings();
    let policy = request.policy(&settings.overtime);
    let hours = request
        .working_hours_per_day
        .unwrap_or(settings.working_hours_per_day);

    json_ok(resolve_overtime_rate(
        request.monthly_salary,
        request.working_days,
        hours,
        &policy,
    ))
}

/// Handler for POST /calculate/adjustments.
async fn adjustments_handler(payload: Result<Json<AdjustmentsRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing adjustments request");

    match parse_body(payload, correlation_id) {
        Ok(req) => json_ok(aggregate_adjustments(req.adjustments)),
        Err(rejection) => rejection.into_response(),
    }
}

/// Handler for POST /calculate/payslip.
async fn payslip_handler(payload: Result<Json<PayslipInput>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    match parse_body(payload, correlation_id) {
        Ok(input) => json_ok(compose_payslip(&input)),
        Err(rejection) => rejection.into_response(),
    }
}

/// Handler for POST /calculate/working-days.
async fn working_days_handler(payload: Result<Json<WorkingDaysRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing working days request");

    match parse_body(payload, correlation_id) {
        Ok(req) => respond(
            month_working_days(req.year, req.month, &req.holidays),
            correlation_id,
        ),
        Err(rejection) => rejection.into_response(),
    }
}

/// Handler for POST /calculate/payroll.
///
/// Generates a DRAFT payroll run for the submitted employees.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match parse_body(payload, correlation_id) {
        Ok(req) => req,
        Err(rejection) => return rejection.into_response(),
    };
    let settings = state.config().settings();

    let working_days = match (request.working_days, &request.holidays) {
        (Some(days), _) => days,
        (None, Some(holidays)) => {
            match month_working_days(request.year, request.month, holidays) {
                Ok(summary) => summary.working_days,
                Err(err) => return respond::<()>(Err(err), correlation_id),
            }
        }
        (None, None) => settings.default_working_days,
    };
    let period = PayrollPeriod {
        month: request.month,
        year: request.year,
        working_days,
    };

    let start_time = Instant::now();
    let result = generate_payroll_run(&period, &request.employees, settings);
    if let Ok(generated) = &result {
        info!(
            correlation_id = %correlation_id,
            employees = request.employees.len(),
            working_days,
            total_net_pay = %generated.run.total_net_pay(),
            warnings = generated.audit_trace.warnings.len(),
            duration_us = start_time.elapsed().as_micros(),
            "Payroll calculation completed successfully"
        );
    }
    respond(result, correlation_id)
}
