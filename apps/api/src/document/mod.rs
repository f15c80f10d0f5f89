// Document ingestion: uploaded PDF bytes in, plain text and metrics out.
// The PDF library sits behind `PdfReader` so the extractor never names it.

pub mod extractor;
pub mod handlers;
pub mod reader;

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use extractor::extract;
pub use reader::LopdfReader;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not read the PDF: {0}")]
    Unreadable(String),

    #[error("The text extracted from the résumé is empty. Please upload a different PDF.")]
    EmptyDocument,

    #[error("PDF extraction was interrupted: {0}")]
    Interrupted(String),
}

/// One uploaded PDF. Read-only once constructed; dropped with the request.
#[derive(Debug, Clone)]
pub struct Document {
    bytes: Bytes,
    file_name: Option<String>,
}

impl Document {
    pub fn new(bytes: Bytes, file_name: Option<String>) -> Self {
        Self { bytes, file_name }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn file_size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Document-info properties (`title`, `author`, ...). Blank values are never stored,
/// so a missing key always means "not provided by the PDF".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let value = value.trim();
        if !value.is_empty() {
            self.0.insert(key.into(), value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn author(&self) -> Option<&str> {
        self.get("author")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::default();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

/// Snapshot computed once per document.
///
/// `page_count` and `metadata` are `None` when the document properties could not
/// be read; the text-derived fields are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub word_count: usize,
    pub file_size_mb: f64,
    pub page_count: Option<usize>,
    pub metadata: Option<Metadata>,
}

impl Metrics {
    pub fn file_size_mb_from_bytes(bytes: u64) -> f64 {
        bytes as f64 / BYTES_PER_MB
    }
}

/// Result of a successful extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub text: String,
    pub metrics: Metrics,
}

/// PDF-decoding capability. Implementations turn raw bytes into an open handle.
pub trait PdfReader: Send + Sync {
    fn open(&self, bytes: Bytes) -> Result<Box<dyn OpenedPdf>, ExtractionError>;
}

/// An open PDF. Dropping the handle releases whatever the reader acquired.
pub trait OpenedPdf: Send {
    /// Text of every page, in page order.
    fn pages_text(&self) -> Result<Vec<String>, ExtractionError>;

    fn page_count(&self) -> Result<usize, ExtractionError>;

    fn metadata(&self) -> Result<Metadata, ExtractionError>;
}
