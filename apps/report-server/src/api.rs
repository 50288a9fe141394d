//! API handlers for the report server
//!
//! Provides REST endpoints for:
//! - Word export of a report definition
//! - Document outline preview
//! - Health check

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use docx_engine::docx::Document;
use report_types::{Report, ReportStatus};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "report-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Reject blank bodies before any decoding
fn read_report(body: &Bytes) -> Result<Report, ServerError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ServerError::InvalidRequest("Request body is empty".to_string()));
    }
    Ok(docx_engine::parse_report(body)?)
}

/// `Content-Disposition` for a download; non-ASCII names also get an RFC 5987 form
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();

    if fallback == filename {
        format!("attachment; filename=\"{}\"", fallback)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(filename)
        )
    }
}

/// Handler: POST /api/reports/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ServerError> {
    let report = read_report(&body)?;
    info!(
        report = %report.name,
        pages = report.pages.len(),
        elements = report.element_count(),
        from = %report.status,
        status = %report.status.begin_generation(),
        "Generation requested"
    );

    let name = report.name.clone();
    let result =
        docx_engine::generate_document(report, state.render_options(), state.timeout_ms).await;

    let status = ReportStatus::outcome(result.is_ok());
    let generated = match result {
        Ok(generated) => generated,
        Err(err) => {
            warn!(report = %name, %status, "Generation ended");
            return Err(err.into());
        }
    };
    info!(
        report = %name,
        %status,
        bytes = generated.bytes.len(),
        pages = generated.page_count,
        "Generation ended"
    );

    let disposition = HeaderValue::from_str(&content_disposition(&generated.filename))
        .map_err(|e| ServerError::Internal(format!("Invalid file name header: {}", e)))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(docx_engine::DOCX_MIME)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        generated.bytes,
    )
        .into_response())
}

/// Outline response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineResponse {
    pub success: bool,
    pub status: ReportStatus,
    pub page_count: usize,
    pub element_count: usize,
    pub document: Document,
}

/// Handler: POST /api/reports/outline
pub async fn handle_outline(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<OutlineResponse>, ServerError> {
    let report = read_report(&body)?;
    debug!(report = %report.name, "Outline requested");

    let status = report.status;
    let element_count = report.element_count();
    let document =
        docx_engine::outline_document(report, state.render_options(), state.timeout_ms).await?;

    Ok(Json(OutlineResponse {
        success: true,
        status,
        page_count: document.sections.len(),
        element_count,
        document,
    }))
}
