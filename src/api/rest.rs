// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
//   POST /analyze            { "ticker": "AAPL", "period": "6mo" }
//   POST /api/v1/analyze     same handler
//   GET  /api/v1/health
//
// Failures are returned as `{ "error": "<message>" }` with a status derived
// from the error kind.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::AnalysisSummary;
use crate::app_state::AppState;
use crate::error::{AnalysisError, ProviderError};
use crate::provider::Lookback;

// =============================================================================
// Router construction
// =============================================================================

/// Build the REST router with CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze", post(analyze))
        .route("/api/v1/analyze", post(analyze))
        .route("/api/v1/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Errors
// =============================================================================

/// Anything an endpoint can fail with.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Analysis(AnalysisError),
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        Self::Analysis(e)
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        Self::Analysis(AnalysisError::Provider(e))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Analysis(AnalysisError::InsufficientData { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Analysis(AnalysisError::InvalidParameter { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Analysis(AnalysisError::Provider(e)) => match e {
                ProviderError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                ProviderError::UnknownSymbol(_) => StatusCode::NOT_FOUND,
                ProviderError::Request(_)
                | ProviderError::Api { .. }
                | ProviderError::Malformed(_)
                | ProviderError::InvalidSeries(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Analysis(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({ "error": self.message() });
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Analyze
// =============================================================================

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    #[serde(default)]
    ticker: Option<String>,
    #[serde(default)]
    period: Option<String>,
}

fn required(field: Option<String>, name: &str) -> Result<String, ApiError> {
    field
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("missing field '{name}'")))
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisSummary>, ApiError> {
    let fields = payload
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
        .and_then(|Json(req)| {
            Ok((required(req.ticker, "ticker")?, required(req.period, "period")?))
        });
    let (ticker, period) = match fields {
        Ok(fields) => fields,
        Err(e) => {
            state.record_failure();
            warn!(error = %e.message(), "rejected analyze request");
            return Err(e);
        }
    };

    let span = info_span!("analyze", request_id = %Uuid::new_v4(), %ticker, %period);

    let result = async {
        let lookback: Lookback = period.parse()?;
        let series = state.provider.fetch(&ticker, lookback).await?;
        info!(bars = series.len(), "series received");
        let summary = state.pipeline().run(&series)?;
        Ok::<_, ApiError>(summary)
    }
    .instrument(span.clone())
    .await;

    match result {
        Ok(summary) => {
            state.record_success();
            Ok(Json(summary))
        }
        Err(e) => {
            state.record_failure();
            span.in_scope(|| warn!(status = %e.status(), error = %e.message(), "analysis failed"));
            Err(e)
        }
    }
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
    uptime_secs: u64,
    requests_served: u64,
    requests_failed: u64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        server_time: chrono::Utc::now().timestamp_millis(),
        uptime_secs: state.uptime_secs(),
        requests_served: state.requests_served(),
        requests_failed: state.requests_failed(),
    })
}
