//! HTTP request handlers for the contract review service.
//!
//! Serves the upload form, runs analyses, returns the report download, and
//! exposes a JSON API and a health check.

use crate::render::{self, REPORT_FILENAME};
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router,
};
use clauselens_analyzer::{Analyzer, AnalyzerError, ContractInput, RunOutcome};
use clauselens_domain::CompletionProvider;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared application state
pub struct AppState<P>
where
    P: CompletionProvider,
{
    /// Pipeline shared by every request
    pub analyzer: Arc<Analyzer<P>>,
    /// Request body limit in bytes
    pub max_upload_bytes: usize,
}

impl<P: CompletionProvider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Model used for analyses
    pub model: String,
}

/// JSON analysis request
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Contract text
    #[serde(default)]
    pub text: Option<String>,
}

/// JSON analysis response
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// `rendered`, `api_error`, `invalid_output` or `missing_input`
    pub status: String,
    /// Decoded report, when rendered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<serde_json::Value>,
    /// Error message, when not rendered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Raw model output, when it did not decode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl From<RunOutcome> for AnalyzeResponse {
    fn from(outcome: RunOutcome) -> Self {
        let (status, report, message, raw) = match outcome {
            RunOutcome::MissingInput => (
                "missing_input",
                None,
                Some(render::MISSING_INPUT_MESSAGE.to_string()),
                None,
            ),
            RunOutcome::ApiError(message) => ("api_error", None, Some(message), None),
            RunOutcome::InvalidOutput(raw) => (
                "invalid_output",
                None,
                Some(clauselens_analyzer::INVALID_OUTPUT_MESSAGE.to_string()),
                Some(raw),
            ),
            RunOutcome::Rendered(report) => ("rendered", Some(report.into_value()), None, None),
        };
        Self {
            status: status.to_string(),
            report,
            message,
            raw,
        }
    }
}

/// Download form submission
#[derive(Debug, Deserialize)]
pub struct DownloadForm {
    /// Report JSON as rendered on the result page
    pub report: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed request
    BadRequest(String),
    /// Uploaded PDF could not be read
    Extraction(String),
    /// Internal server error
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Extraction(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<AnalyzerError> for AppError {
    fn from(e: AnalyzerError) -> Self {
        match e {
            AnalyzerError::Extraction(inner) => AppError::Extraction(inner.to_string()),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::InternalError(e.to_string())
    }
}

/// GET / - The upload form
async fn index() -> Html<String> {
    Html(render::page(&render::form()))
}

/// POST /analyze - Run one analysis from the form
async fn analyze<P>(
    State(state): State<AppState<P>>,
    multipart: Multipart,
) -> Result<Response, AppError>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: Display,
{
    let input = match read_form(multipart).await {
        Ok(input) => input,
        Err(e) => {
            let status = e.status();
            warn!("Rejected form submission ({}): {}", status, e);
            let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                format!("Upload exceeds the {} byte limit.", state.max_upload_bytes)
            } else {
                format!("Could not read the submitted form: {}", e)
            };
            return Ok(form_error(status, &message));
        }
    };

    let outcome = match Arc::clone(&state.analyzer).run_blocking(input).await {
        Ok(outcome) => outcome,
        Err(AnalyzerError::Extraction(e)) => {
            warn!("Uploaded PDF could not be read: {}", e);
            return Ok(form_error(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let status = match &outcome {
        RunOutcome::Rendered(_) => StatusCode::OK,
        RunOutcome::MissingInput => StatusCode::BAD_REQUEST,
        RunOutcome::ApiError(_) | RunOutcome::InvalidOutput(_) => StatusCode::BAD_GATEWAY,
    };
    let body = render::outcome(&outcome)?;

    Ok((status, Html(render::page(&body))).into_response())
}

/// HTML error page with the form below it
fn form_error(status: StatusCode, message: &str) -> Response {
    let body = format!("{}\n<hr>\n{}", render::error_box(message), render::form());
    (status, Html(render::page(&body))).into_response()
}

/// Collect the `file` and `contract_text` fields
///
/// A body over the configured limit fails with a 413 `MultipartError`.
async fn read_form(mut multipart: Multipart) -> Result<ContractInput, MultipartError> {
    let mut input = ContractInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    info!("Received PDF upload of {} bytes", bytes.len());
                    input.pdf = Some(bytes.to_vec());
                }
            }
            "contract_text" => {
                input.text = Some(field.text().await?);
            }
            _ => {}
        }
    }

    Ok(input)
}

/// POST /download - Return the report as an attachment
async fn download(Form(form): Form<DownloadForm>) -> Result<Response, AppError> {
    let value: serde_json::Value = serde_json::from_str(&form.report)
        .map_err(|e| AppError::BadRequest(format!("Report is not valid JSON: {}", e)))?;
    let pretty = serde_json::to_string_pretty(&value)?;

    let disposition = format!("attachment; filename=\"{}\"", REPORT_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pretty,
    )
        .into_response())
}

/// POST /api/analyze - Run one analysis from JSON
async fn api_analyze<P>(
    State(state): State<AppState<P>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: Display,
{
    let input = ContractInput {
        pdf: None,
        text: request.text,
    };

    let outcome = Arc::clone(&state.analyzer)
        .run_blocking(input)
        .await
        .map_err(|e| {
            error!("Analysis failed: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(outcome.into()))
}

/// GET /health - Liveness check
async fn health_check<P>(State(state): State<AppState<P>>) -> Json<HealthCheckResponse>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: Display,
{
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        model: state.analyzer.config().model.clone(),
    })
}

/// Create the axum router with all routes
pub fn create_router<P>(state: AppState<P>) -> Router
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: Display,
{
    let limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze::<P>))
        .route("/download", post(download))
        .route("/api/analyze", post(api_analyze::<P>))
        .route("/health", get(health_check::<P>))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}
