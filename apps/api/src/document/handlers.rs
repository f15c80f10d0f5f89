use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::analysis::ValidationError;
use crate::document::{Document, Metrics};
use crate::errors::AppError;
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const UPLOAD_ACCEPTED: &str =
    "Currículum cargado y procesado correctamente. Continúe con la acción seleccionada.";

/// A parsed multipart upload: the PDF part plus every text field by name.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub document: Option<Document>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == FILE_FIELD {
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field.bytes().await?;
                // An empty part is how browsers submit a file input left blank.
                if !bytes.is_empty() {
                    form.document = Some(Document::new(bytes, file_name));
                }
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn take(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub status: &'static str,
    pub file_name: Option<String>,
    pub metrics: Metrics,
}

/// POST /api/v1/documents/metrics
/// Extracts the uploaded résumé and reports its metrics without contacting the backend.
pub async fn handle_document_metrics(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MetricsResponse>, AppError> {
    let form = UploadForm::read(multipart).await?;
    let document = form.document.ok_or(ValidationError::MissingFile)?;
    let file_name = document.file_name().map(str::to_owned);

    let extraction = state.analyzer.extract(document).await?;
    info!(
        "Document metrics computed: {} words, {:?} pages",
        extraction.metrics.word_count, extraction.metrics.page_count
    );

    Ok(Json(MetricsResponse {
        status: UPLOAD_ACCEPTED,
        file_name,
        metrics: extraction.metrics,
    }))
}
