//! HTTP request handlers for the payroll reporting engine API.
//!
//! Every handler verifies the `x-session-token` header into a
//! [`crate::ports::Principal`] before calling into a service; role checks
//! live in the services themselves.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, patch, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::ports::{require_admin, require_auth};

use super::request::{
    BulkGenerateRequest, GenerateDocumentRequest, PayrollReportRequest, SendDocumentRequest,
    TimeTrackingReportRequest, UpdateStatusRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/tax-documents", post(generate_document_handler))
        .route("/payroll/tax-documents/bulk", post(bulk_generate_handler))
        .route(
            "/payroll/tax-documents/:id/download",
            post(download_document_handler),
        )
        .route(
            "/payroll/tax-documents/:id/send",
            post(send_document_handler),
        )
        .route(
            "/payroll/tax-documents/:id/status",
            patch(update_status_handler),
        )
        .route("/payroll/tax-documents/:id", delete(delete_document_handler))
        .route("/payroll/reports", post(payroll_report_handler))
        .route("/time-tracking/reports", post(time_tracking_report_handler))
        .with_state(state)
}

fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-session-token")
        .and_then(|value| value.to_str().ok())
}

fn ok_json<T: Serialize>(value: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(value),
    )
        .into_response()
}

fn bad_request(error: ApiError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn engine_error(correlation_id: Uuid, error: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    let api_error: ApiErrorResponse = error.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Maps JSON body rejections to structured errors.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => Err(match rejection {
            JsonRejection::JsonDataError(err) => {
                // The body text carries the detailed error from serde
                let body_text = err.body_text();
                warn!(
                    correlation_id = %correlation_id,
                    error = %body_text,
                    "JSON data error"
                );
                if body_text.contains("missing field") {
                    ApiError::new("VALIDATION_ERROR", body_text)
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
                ApiError::malformed_json(format!("Invalid JSON syntax: {err}"))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        }),
    }
}

/// Handler for `POST /payroll/tax-documents`.
async fn generate_document_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GenerateDocumentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax-document generation request");

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return bad_request(error),
    };
    let principal = match require_admin(state.auth(), session_token(&headers)).await {
        Ok(principal) => principal,
        Err(err) => return engine_error(correlation_id, err),
    };

    match state
        .documents()
        .generate(
            &principal,
            &request.employee_id,
            request.document_type,
            request.period,
            request.tax_year,
            request.amount,
            request.notes,
        )
        .await
    {
        Ok(outcome) => ok_json(outcome),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for `POST /payroll/tax-documents/bulk`.
async fn bulk_generate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<BulkGenerateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing bulk tax-document generation request");

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return bad_request(error),
    };
    let principal = match require_admin(state.auth(), session_token(&headers)).await {
        Ok(principal) => principal,
        Err(err) => return engine_error(correlation_id, err),
    };

    match state
        .documents()
        .bulk_generate(
            &principal,
            request.employee_ids,
            request.document_type,
            request.period,
            request.tax_year,
        )
        .await
    {
        Ok(outcome) => ok_json(outcome),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for `POST /payroll/tax-documents/{id}/download`.
async fn download_document_handler(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        %document_id,
        "Processing tax-document download request"
    );

    let principal = match require_auth(state.auth(), session_token(&headers)).await {
        Ok(principal) => principal,
        Err(err) => return engine_error(correlation_id, err),
    };

    match state.documents().download(&principal, &document_id).await {
        Ok(outcome) => ok_json(outcome),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for `POST /payroll/tax-documents/{id}/send`.
async fn send_document_handler(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<SendDocumentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        %document_id,
        "Processing tax-document send request"
    );

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return bad_request(error),
    };
    let principal = match require_auth(state.auth(), session_token(&headers)).await {
        Ok(principal) => principal,
        Err(err) => return engine_error(correlation_id, err),
    };

    match state
        .documents()
        .send(
            &principal,
            &document_id,
            &request.recipient_email,
            request.message,
        )
        .await
    {
        Ok(outcome) => ok_json(outcome),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for `PATCH /payroll/tax-documents/{id}/status`.
async fn update_status_handler(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        %document_id,
        "Processing tax-document status update"
    );

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return bad_request(error),
    };
    let principal = match require_auth(state.auth(), session_token(&headers)).await {
        Ok(principal) => principal,
        Err(err) => return engine_error(correlation_id, err),
    };

    match state
        .documents()
        .update_status(&principal, &document_id, request.status, request.notes)
        .await
    {
        Ok(outcome) => ok_json(outcome),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for `DELETE /payroll/tax-documents/{id}`.
async fn delete_document_handler(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        %document_id,
        "Processing tax-document delete request"
    );

    let principal = match require_admin(state.auth(), session_token(&headers)).await {
        Ok(principal) => principal,
        Err(err) => return engine_error(correlation_id, err),
    };

    match state.documents().delete(&principal, &document_id).await {
        Ok(outcome) => ok_json(outcome),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for `POST /payroll/reports`.
async fn payroll_report_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PayrollReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll report request");

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return bad_request(error),
    };
    let principal = match require_auth(state.auth(), session_token(&headers)).await {
        Ok(principal) => principal,
        Err(err) => return engine_error(correlation_id, err),
    };

    match state
        .reports()
        .generate_payroll_report(
            &principal,
            request.start_date,
            request.end_date,
            request.report_type,
        )
        .await
    {
        Ok(outcome) => ok_json(outcome),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for `POST /time-tracking/reports`.
async fn time_tracking_report_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TimeTrackingReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing time-tracking report request");

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return bad_request(error),
    };
    let principal = match require_auth(state.auth(), session_token(&headers)).await {
        Ok(principal) => principal,
        Err(err) => return engine_error(correlation_id, err),
    };

    match state
        .reports()
        .generate_time_tracking_report(
            &principal,
            &request.name,
            request.report_type,
            request.start_date,
            request.end_date,
            request.filters,
        )
        .await
    {
        Ok(outcome) => ok_json(outcome),
        Err(err) => engine_error(correlation_id, err),
    }
}
