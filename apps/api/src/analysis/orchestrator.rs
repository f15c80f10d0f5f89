//! Analysis pipeline: Validate → Extract → Compose → Dispatch.
//!
//! Linear, no retries between stages. Any failure is terminal for the request and
//! comes back as one `AnalysisError` variant.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::analysis::{
    compose, AnalysisError, AnalysisMode, AnalysisReport, AnalysisRequest, ValidationError,
};
use crate::document::{extract as extract_document, Document, Extraction, ExtractionError, PdfReader};
use crate::llm_client::{self, TextGenerator};

/// Owns the two collaborators. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct Analyzer {
    reader: Arc<dyn PdfReader>,
    backend: Arc<dyn TextGenerator>,
}

/// A request that passed validation: every field its mode needs is present.
struct ValidatedRequest {
    mode: AnalysisMode,
    document: Document,
    job_description: Option<String>,
    api_key: String,
}

impl Analyzer {
    pub fn new(reader: Arc<dyn PdfReader>, backend: Arc<dyn TextGenerator>) -> Self {
        Self { reader, backend }
    }

    /// Runs one analysis and returns the backend's report verbatim.
    pub async fn run(&self, request: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let request = validate(request)?;
        debug!("Validated request (mode: {})", request.mode.id());

        let extraction = self.extract(request.document).await?;
        info!(
            "Extracted résumé: {} words, {:.2} MB",
            extraction.metrics.word_count, extraction.metrics.file_size_mb
        );

        let prompt = compose(
            request.mode,
            &extraction.text,
            &extraction.metrics,
            request.job_description.as_deref(),
        );
        debug!("Composed {} prompt ({} chars)", request.mode.id(), prompt.len());

        let report = llm_client::complete(self.backend.as_ref(), &prompt, &request.api_key).await?;
        info!("Analysis completed ({} chars)", report.len());

        Ok(AnalysisReport {
            mode: request.mode,
            report,
        })
    }

    /// Extracts text and metrics on the blocking pool. The PDF handle is released
    /// before this returns.
    pub async fn extract(&self, document: Document) -> Result<Extraction, ExtractionError> {
        let reader = Arc::clone(&self.reader);
        tokio::task::spawn_blocking(move || extract_document(reader.as_ref(), &document))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    // Parser panics come from malformed input.
                    warn!("PDF parsing panicked: {e}");
                    ExtractionError::Unreadable("the PDF could not be parsed".to_string())
                } else {
                    ExtractionError::Interrupted(e.to_string())
                }
            })?
    }
}

/// Checks, in order: file, API key, mode, and the job description when the mode needs one.
fn validate(request: AnalysisRequest) -> Result<ValidatedRequest, ValidationError> {
    let document = request
        .document
        .filter(|d| !d.is_empty())
        .ok_or(ValidationError::MissingFile)?;

    let api_key = non_blank(request.api_key).ok_or(ValidationError::MissingApiKey)?;

    let mode = request
        .mode
        .as_deref()
        .unwrap_or_default()
        .parse::<AnalysisMode>()?;

    let job_description = request
        .job_description
        .filter(|jd| !jd.trim().is_empty());
    if mode.requires_job_description() && job_description.is_none() {
        return Err(ValidationError::MissingJobDescription);
    }

    Ok(ValidatedRequest {
        mode,
        document,
        job_description,
        api_key,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
