//! Fixtures shared by the unit tests: in-memory PDFs and fake collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};

use crate::document::{ExtractionError, Metadata, OpenedPdf, PdfReader};
use crate::llm_client::{BackendError, GenerationSession, TextGenerator};

pub struct PdfInfo<'a> {
    pub title: &'a str,
    pub author: &'a str,
}

/// Builds a PDF with one Courier text line per page.
pub fn build_pdf(pages: &[&str], info: Option<PdfInfo<'_>>) -> Vec<u8> {
    let pages = pages
        .iter()
        .map(|text| {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        })
        .collect();
    build_pdf_with_operations(pages, info)
}

/// Builds a PDF whose page content streams are exactly `pages`, with `F1` bound
/// to Courier in every page's resources.
pub fn build_pdf_with_operations(
    pages: Vec<Vec<Operation>>,
    info: Option<PdfInfo<'_>>,
) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(info) = info {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(info.title),
            "Author" => Object::string_literal(info.author),
        });
        doc.trailer.set("Info", info_id);
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("serialize pdf");
    buf
}

/// Scripted `PdfReader` that counts handles opened and released.
#[derive(Clone, Default)]
pub struct FakeReader {
    pages: Vec<String>,
    metadata: Metadata,
    unreadable: bool,
    broken_metadata: bool,
    pub opened: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
}

impl FakeReader {
    pub fn with_pages(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn unreadable() -> Self {
        Self {
            unreadable: true,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.metadata.insert("title", title);
        self
    }

    pub fn with_broken_metadata(mut self) -> Self {
        self.broken_metadata = true;
        self
    }
}

impl PdfReader for FakeReader {
    fn open(&self, _bytes: Bytes) -> Result<Box<dyn OpenedPdf>, ExtractionError> {
        if self.unreadable {
            return Err(ExtractionError::Unreadable("not a PDF".to_string()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeHandle {
            reader: self.clone(),
        }))
    }
}

struct FakeHandle {
    reader: FakeReader,
}

impl OpenedPdf for FakeHandle {
    fn pages_text(&self) -> Result<Vec<String>, ExtractionError> {
        Ok(self.reader.pages.clone())
    }

    fn page_count(&self) -> Result<usize, ExtractionError> {
        Ok(self.reader.pages.len())
    }

    fn metadata(&self) -> Result<Metadata, ExtractionError> {
        if self.reader.broken_metadata {
            return Err(ExtractionError::Unreadable("corrupt info".to_string()));
        }
        Ok(self.reader.metadata.clone())
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.reader.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Scripted `TextGenerator` recording every key and prompt it receives.
#[derive(Clone)]
pub struct FakeBackend {
    reply: Result<String, BackendError>,
    pub keys: Arc<Mutex<Vec<String>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeBackend {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Ok(text.to_string()))
    }

    pub fn failing(error: BackendError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<String, BackendError>) -> Self {
        Self {
            reply,
            keys: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sessions_opened(&self) -> usize {
        self.keys.lock().unwrap().len()
    }

    pub fn prompts_sent(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeBackend {
    async fn authenticate(
        &self,
        api_key: &str,
    ) -> Result<Box<dyn GenerationSession>, BackendError> {
        self.keys.lock().unwrap().push(api_key.to_string());
        Ok(Box::new(self.clone()))
    }
}

#[async_trait]
impl GenerationSession for FakeBackend {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}
