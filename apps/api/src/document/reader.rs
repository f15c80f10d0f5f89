//! `lopdf`-backed implementation of the PDF collaborator.
//!
//! Page text comes from `lopdf` page by page. When that fails, or yields nothing but
//! whitespace, the whole document is handed to `pdf-extract`, which copes better with
//! CID fonts and ToUnicode maps but does not preserve page boundaries.

use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;
use lopdf::{Dictionary, Object};
use tracing::{debug, warn};

use super::{ExtractionError, Metadata, OpenedPdf, PdfReader};

/// Info-dictionary keys copied into `Metadata`, with the names they are stored under.
const INFO_KEYS: [(&[u8], &str); 6] = [
    (b"Title", "title"),
    (b"Author", "author"),
    (b"Subject", "subject"),
    (b"Keywords", "keywords"),
    (b"Creator", "creator"),
    (b"Producer", "producer"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfReader;

impl PdfReader for LopdfReader {
    fn open(&self, bytes: Bytes) -> Result<Box<dyn OpenedPdf>, ExtractionError> {
        let doc = lopdf::Document::load_mem(&bytes)
            .map_err(|e| ExtractionError::Unreadable(format!("failed to decode PDF: {e}")))?;
        debug!("Opened PDF: {} bytes, {} pages", bytes.len(), doc.get_pages().len());
        Ok(Box::new(LopdfDocument { doc, bytes }))
    }
}

struct LopdfDocument {
    doc: lopdf::Document,
    bytes: Bytes,
}

impl LopdfDocument {
    /// Whole-document text via `pdf-extract`. That crate panics on some malformed
    /// content streams; a panic is reported as an unreadable document.
    fn fallback_text(&self) -> Result<String, ExtractionError> {
        let bytes = &self.bytes;
        match panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        })) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractionError::Unreadable(format!(
                "text extraction failed: {e}"
            ))),
            Err(_) => Err(ExtractionError::Unreadable(
                "text extraction aborted on malformed content".to_string(),
            )),
        }
    }

    fn info_dictionary(&self) -> Result<Option<&Dictionary>, ExtractionError> {
        let Ok(info) = self.doc.trailer.get(b"Info") else {
            return Ok(None);
        };
        let dict = match info {
            Object::Reference(id) => self.doc.get_dictionary(*id).map_err(|e| {
                ExtractionError::Unreadable(format!("unreadable document info: {e}"))
            })?,
            Object::Dictionary(dict) => dict,
            _ => {
                return Err(ExtractionError::Unreadable(
                    "document info is not a dictionary".to_string(),
                ))
            }
        };
        Ok(Some(dict))
    }
}

impl OpenedPdf for LopdfDocument {
    fn pages_text(&self) -> Result<Vec<String>, ExtractionError> {
        let page_numbers: Vec<u32> = self.doc.get_pages().keys().copied().collect();

        let per_page: Result<Vec<String>, lopdf::Error> = page_numbers
            .iter()
            .map(|n| self.doc.extract_text(&[*n]))
            .collect();

        resolve_pages(per_page, || self.fallback_text())
    }

    fn page_count(&self) -> Result<usize, ExtractionError> {
        Ok(self.doc.get_pages().len())
    }

    fn metadata(&self) -> Result<Metadata, ExtractionError> {
        let mut metadata = Metadata::default();
        let Some(info) = self.info_dictionary()? else {
            return Ok(metadata);
        };

        for (pdf_key, key) in INFO_KEYS {
            if let Ok(raw) = info.get(pdf_key).and_then(Object::as_str) {
                metadata.insert(key, decode_text_string(raw));
            }
        }
        Ok(metadata)
    }
}

/// Picks between lopdf's per-page text and the whole-document fallback.
///
/// The fallback runs when a page fails to decode, or when every page came back
/// blank. A blank fallback keeps the (blank) per-page result.
fn resolve_pages(
    per_page: Result<Vec<String>, lopdf::Error>,
    fallback: impl FnOnce() -> Result<String, ExtractionError>,
) -> Result<Vec<String>, ExtractionError> {
    match per_page {
        Ok(pages) if pages.iter().any(|p| !p.trim().is_empty()) => Ok(pages),
        Ok(pages) => match fallback() {
            Ok(text) if !text.trim().is_empty() => {
                debug!("pdf-extract recovered {} chars lopdf could not", text.len());
                Ok(vec![text])
            }
            _ => Ok(pages),
        },
        Err(e) => {
            warn!("Page-level extraction failed ({e}); falling back to pdf-extract");
            fallback().map(|text| vec![text])
        }
    }
}

/// Decodes a PDF text string: UTF-16BE when it carries a BOM, UTF-8 when valid,
/// otherwise byte-per-char (PDFDocEncoding agrees with Latin-1 on printable text).
fn decode_text_string(raw: &[u8]) -> String {
    if let Some(utf16) = raw.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    let raw = raw.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(raw);
    match std::str::from_utf8(raw) {
        Ok(s) => s.to_string(),
        Err(_) => raw.iter().map(|&b| b as char).collect(),
    }
}
