//! Async generation with a deadline
//!
//! Compilation is CPU bound, so it runs on the blocking pool. A render that
//! overruns its deadline is abandoned, not cancelled.

use std::time::Duration;

use report_types::Report;

use super::errors::EngineError;
use super::output::GeneratedDocument;
use super::RenderOptions;
use crate::docx::Document;

async fn run_blocking<T, F>(timeout_ms: u64, work: F) -> Result<T, EngineError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, EngineError> + Send + 'static,
{
    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        tokio::task::spawn_blocking(work),
    )
    .await;

    match result {
        Ok(Ok(done)) => done,
        Ok(Err(join_error)) => Err(EngineError::Task(join_error.to_string())),
        Err(_elapsed) => {
            tracing::warn!(timeout_ms, "Generation timed out");
            Err(EngineError::Timeout(timeout_ms))
        }
    }
}

/// Compile a report on the blocking pool, giving up after `timeout_ms`
pub async fn generate_document(
    report: Report,
    options: RenderOptions,
    timeout_ms: u64,
) -> Result<GeneratedDocument, EngineError> {
    run_blocking(timeout_ms, move || super::generate(&report, &options)).await
}

/// [`super::outline`] on the blocking pool, under the same deadline
pub async fn outline_document(
    report: Report,
    options: RenderOptions,
    timeout_ms: u64,
) -> Result<Document, EngineError> {
    run_blocking(timeout_ms, move || super::outline(&report, &options)).await
}
