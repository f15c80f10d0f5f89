use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::analysis::{AnalysisMode, AnalysisReport, AnalysisRequest, ModeInfo};
use crate::document::handlers::UploadForm;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub mode: AnalysisMode,
    /// The backend's text, passed through unmodified.
    pub report: String,
    pub analyzed_at: DateTime<Utc>,
}

/// GET /api/v1/analysis/modes
pub async fn handle_list_modes() -> Json<Vec<ModeInfo>> {
    Json(AnalysisMode::ALL.into_iter().map(ModeInfo::from).collect())
}

/// POST /api/v1/analysis
/// Multipart fields: `file` (PDF), `mode`, `job_description`, `api_key`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;

    let request = AnalysisRequest {
        mode: form.take("mode"),
        document: form.document.take(),
        job_description: form.take("job_description"),
        api_key: form.take("api_key"),
    };

    let analysis_id = Uuid::new_v4();
    let span = tracing::info_span!("analysis", %analysis_id);
    let AnalysisReport { mode, report } = state.analyzer.run(request).instrument(span).await?;

    Ok(Json(AnalysisResponse {
        analysis_id,
        mode,
        report,
        analyzed_at: Utc::now(),
    }))
}
