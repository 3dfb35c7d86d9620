//! HTTP request handlers for the Legislative Impact Engine API.
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
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;

use super::request::{AnalysisRequest, ScanRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze/legislation", post(analyze_legislation_handler))
        .route("/analyze/risk", post(analyze_risk_handler))
        .route("/monitor/scan", post(monitor_scan_handler))
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

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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
    Err(json_response(StatusCode::BAD_REQUEST, error))
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "impact-engine"
    }))
}

/// Handler for POST /analyze/legislation.
///
/// Returns the impact of the legislation on the supplied roster.
async fn analyze_legislation_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing legislation analysis request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let result = request
        .roster()
        .and_then(|roster| state.engine().analyze(&request.legislation_text, &roster));

    match result {
        Ok(impact) => {
            info!(
                correlation_id = %correlation_id,
                employees = request.current_employee_data.len(),
                projected_cost_increase = %impact.projected_cost_increase,
                affected_employee_count = impact.affected_employee_count,
                duration_us = start_time.elapsed().as_micros(),
                "Legislation analysis completed successfully"
            );
            json_response(StatusCode::OK, impact)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /analyze/risk.
///
/// Returns a sealed risk assessment of the legislation.
async fn analyze_risk_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing risk assessment request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let roster = match request.roster() {
        Ok(roster) => roster,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    match state
        .engine()
        .assess_risk_sealed(&request.legislation_text, &roster)
        .await
    {
        Ok(assessment) => {
            info!(
                correlation_id = %correlation_id,
                risk_score = %assessment.risk_score,
                risk_level = ?assessment.risk_level,
                anchored = assessment.audit_proof.is_anchored(),
                duration_us = start_time.elapsed().as_micros(),
                "Risk assessment completed successfully"
            );
            json_response(StatusCode::OK, assessment)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /monitor/scan.
///
/// Scans feeds and ad-hoc texts and returns the aggregate report.
async fn monitor_scan_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monitor scan request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let roster = match request.roster() {
        Ok(roster) => roster,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    match state
        .engine()
        .scan(
            state.fetcher(),
            &request.feed_urls,
            &request.ad_hoc_texts,
            &roster,
        )
        .await
    {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                analyzed_count = report.analyzed_count,
                skipped = report.skipped_sources.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Monitor scan completed successfully"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::ImpactResult;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::from_config(config).expect("Failed to build state")
    }

    fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_static_payload() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "impact-engine");
    }

    #[tokio::test]
    async fn test_analyze_legislation_returns_impact() {
        let router = create_router(create_test_state());
        let body = r#"{
            "legislation_text": "An increase of 2% tax effective January 1, 2026.",
            "current_employee_data": [
                {"id": "1", "name": "Alice", "salary": 90000},
                {"id": "2", "name": "Bob", "salary": 160000}
            ]
        }"#;

        let response = router
            .oneshot(post_json("/analyze/legislation", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let impact: ImpactResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(impact.projected_cost_increase, Decimal::new(3200, 0));
        assert_eq!(impact.affected_employee_count, 1);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json("/analyze/legislation", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_legislation_text_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json("/analyze/risk", r#"{"current_employee_data": []}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("legislation_text"));
    }

    #[tokio::test]
    async fn test_negative_salary_returns_400() {
        let router = create_router(create_test_state());
        let body = r#"{
            "legislation_text": "A 1% tax increase.",
            "current_employee_data": [{"id": "9", "name": "Neg", "salary": -5}]
        }"#;
        let response = router
            .oneshot(post_json("/analyze/legislation", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_ROSTER");
    }

    #[tokio::test]
    async fn test_malformed_amount_returns_400() {
        let router = create_router(create_test_state());
        let body = r#"{
            "legislation_text": "Healthcare costs of $, are required.",
            "current_employee_data": [{"id": "1", "salary": 50000}]
        }"#;
        let response = router
            .oneshot(post_json("/analyze/legislation", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_AMOUNT");
    }
}
