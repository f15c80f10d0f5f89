use tracing::{debug, warn};

use super::{Document, Extraction, ExtractionError, Metrics, PdfReader};

/// Extracts résumé text and metrics from an uploaded PDF.
///
/// The reader handle lives only inside this function, so it is released on every
/// return path before the caller moves on. Text that is empty or whitespace-only is
/// an error, not a degenerate success. Page count and metadata are best effort: if
/// either cannot be read, both come back as `None` and extraction still succeeds.
pub fn extract(reader: &dyn PdfReader, document: &Document) -> Result<Extraction, ExtractionError> {
    let handle = reader.open(document.bytes().clone())?;

    let text: String = handle.pages_text()?.concat();
    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    let word_count = text.split_whitespace().count();
    let file_size_mb = Metrics::file_size_mb_from_bytes(document.file_size_bytes());

    let (page_count, metadata) = match (handle.page_count(), handle.metadata()) {
        (Ok(pages), Ok(metadata)) => (Some(pages), Some(metadata)),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Document properties unavailable, continuing with basic metrics: {e}");
            (None, None)
        }
    };

    debug!(
        "Extracted {} words from {:?} ({:.2} MB, pages: {:?})",
        word_count,
        document.file_name().unwrap_or("<unnamed>"),
        file_size_mb,
        page_count
    );

    Ok(Extraction {
        text,
        metrics: Metrics {
            word_count,
            file_size_mb,
            page_count,
            metadata,
        },
    })
}
