//! HTTP surface: a single JSON evaluation endpoint.
//!
//! `POST /evaluate` takes `{code, language}` and returns the full
//! analysis report. Request and syntax problems map to 400 with the
//! parser's message surfaced verbatim; anything unexpected maps to 500
//! with the error chain as diagnostic detail.

use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;
use crate::core::errors::AnalyzeError;
use crate::core::{AnalysisReport, AnalysisRequest, Language};
use crate::engine;
use crate::lint::PylintRunner;

#[derive(Clone)]
pub struct AppState {
    pub linter: Arc<PylintRunner>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate))
        .with_state(state)
}

/// Run the service until the process is stopped.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState {
        linter: Arc::new(PylintRunner::from_config(&config.lint)),
    };
    let app = router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| anyhow!("failed to bind {address}: {e}"))?;
    tracing::info!(%address, "evaluation service listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn evaluate(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Request must be JSON: {rejection}"),
                None,
            );
        }
    };

    match handle_evaluate(&state, request).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn handle_evaluate(
    state: &AppState,
    request: EvaluateRequest,
) -> Result<AnalysisReport, AnalyzeError> {
    let code = request.code.unwrap_or_default();
    if code.is_empty() {
        return Err(AnalyzeError::request("Code is required"));
    }

    // Absent language defaults to Python, matching the documented contract.
    let language = match request.language {
        None => Language::Python,
        Some(name) => Language::from_name(&name)
            .ok_or_else(|| AnalyzeError::request(format!("Unsupported language: {name}")))?,
    };

    let analysis_request = AnalysisRequest::new(code.clone(), language)?;
    let report = tokio::task::spawn_blocking(move || engine::analyze(&analysis_request))
        .await
        .map_err(|err| AnalyzeError::Internal(anyhow!("analysis task failed: {err}")))??;

    // The linter only understands Python; other languages ship without
    // the supplementary quality field.
    let quality = match language {
        Language::Python => state.linter.assess(&code).await,
        Language::JavaScript => None,
    };

    Ok(report.with_quality(quality))
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        match self {
            AnalyzeError::Request(message) | AnalyzeError::Syntax(message) => {
                error_response(StatusCode::BAD_REQUEST, message, None)
            }
            AnalyzeError::Internal(err) => {
                tracing::error!(error = ?err, "analysis failed unexpectedly");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.to_string(),
                    Some(format!("{err:?}")),
                )
            }
        }
    }
}

fn error_response(status: StatusCode, error: String, details: Option<String>) -> Response {
    (status, Json(ErrorBody { error, details })).into_response()
}
