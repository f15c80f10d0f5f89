/// LLM Client: the single point of entry for text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may talk to the generation backend directly.
/// Callers go through `complete`, which opens a session from the caller's own API key
/// and issues exactly one completion request. No credential is held process-wide.
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

pub use gemini::GeminiClient;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

/// Every way a completion can fail, flattened so callers never see transport types.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("The API key was rejected by the text-generation service: {0}")]
    Authentication(String),

    #[error("The text-generation service quota or rate limit was exceeded: {0}")]
    QuotaExceeded(String),

    #[error("The text-generation service is unavailable: {0}")]
    Unavailable(String),

    #[error("The text-generation service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("The text-generation service rejected the request: {0}")]
    Rejected(String),

    #[error("The text-generation service returned an unusable response: {0}")]
    MalformedResponse(String),

    #[error("The text-generation service refused to answer: {0}")]
    Blocked(String),
}

impl BackendError {
    /// Failures worth another attempt when a retry budget is configured.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BackendError::QuotaExceeded(_) | BackendError::Unavailable(_)
        )
    }
}

/// Timeout and retry policy for the remote call.
///
/// Defaults to a bounded timeout and a single attempt; retries are opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendPolicy {
    /// `None` lets the call block until the backend answers.
    pub timeout: Option<Duration>,
    pub max_retries: u32,
    /// First retry delay; doubles on each further attempt.
    pub backoff: Duration,
}

impl Default for BackendPolicy {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            max_retries: 0,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl BackendPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Text-generation capability: turns a caller-supplied key into a session.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn authenticate(&self, api_key: &str)
        -> Result<Box<dyn GenerationSession>, BackendError>;
}

/// A per-request session bound to one credential.
#[async_trait]
pub trait GenerationSession: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}

/// Authenticates with `api_key` and sends `prompt` as a single completion.
pub async fn complete(
    backend: &dyn TextGenerator,
    prompt: &str,
    api_key: &str,
) -> Result<String, BackendError> {
    let session = backend.authenticate(api_key).await?;
    session.generate(prompt).await
}
