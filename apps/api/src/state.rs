use crate::analysis::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the PDF reader and the text-generation backend. No caller credential
    /// lives here; each analysis brings its own key.
    pub analyzer: Analyzer,
    pub config: Config,
}
