//! Google Gemini `generateContent` backend.
//!
//! Model defaults to gemini-1.5-flash; base URL and model come from `Config` so tests
//! and alternate deployments can point elsewhere.

use async_trait::async_trait;
use reqwest::{header::HeaderValue, Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{BackendError, BackendPolicy, GenerationSession, TextGenerator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    fn into_text(self) -> Result<String, BackendError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match block_reason {
                Some(reason) => BackendError::Blocked(format!("prompt blocked ({reason})")),
                None => BackendError::MalformedResponse("response has no candidates".to_string()),
            });
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(match candidate.finish_reason.as_deref() {
                Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                    BackendError::Blocked(format!("generation stopped ({reason})"))
                }
                _ => BackendError::MalformedResponse("response contains no text".to_string()),
            });
        }

        Ok(text)
    }
}

/// Factory for per-request Gemini sessions. Holds only the connection pool and
/// endpoint settings; credentials arrive with each `authenticate` call.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    policy: BackendPolicy,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        policy: BackendPolicy,
    ) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = policy.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            policy,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn authenticate(
        &self,
        api_key: &str,
    ) -> Result<Box<dyn GenerationSession>, BackendError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(BackendError::Authentication(
                "no API key was supplied".to_string(),
            ));
        }
        let mut key_header = HeaderValue::from_str(api_key).map_err(|_| {
            BackendError::Authentication("the API key contains invalid characters".to_string())
        })?;
        key_header.set_sensitive(true);

        Ok(Box::new(GeminiSession {
            client: self.client.clone(),
            endpoint: self.endpoint(),
            api_key: key_header,
            policy: self.policy,
        }))
    }
}

struct GeminiSession {
    client: Client,
    endpoint: String,
    api_key: HeaderValue,
    policy: BackendPolicy,
}

impl GeminiSession {
    async fn send_once(&self, request: &GenerateContentRequest<'_>) -> Result<String, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, self.api_key.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| BackendError::MalformedResponse(format!("invalid JSON body: {e}")))?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={:?}, output_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        parsed.into_text()
    }

    fn transport_error(&self, error: reqwest::Error) -> BackendError {
        if error.is_timeout() {
            BackendError::Timeout(self.policy.timeout.unwrap_or_default())
        } else {
            BackendError::Unavailable(error.to_string())
        }
    }
}

#[async_trait]
impl GenerationSession for GeminiSession {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let delay = self.policy.delay_for(attempt);
                warn!(
                    "Gemini attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match self.send_once(&request).await {
                Err(e) if e.is_transient() && attempt < self.policy.max_retries => {
                    warn!("Gemini call failed: {e}");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

/// Maps a non-success HTTP status (plus Gemini's error body) onto a `BackendError`.
fn classify_failure(status: StatusCode, body: &str) -> BackendError {
    let parsed = serde_json::from_str::<GeminiErrorEnvelope>(body).ok();
    let message = parsed
        .as_ref()
        .map(|e| e.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"));
    let key_invalid = body.contains("API_KEY_INVALID")
        || parsed
            .as_ref()
            .is_some_and(|e| e.error.status == "UNAUTHENTICATED");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Authentication(message),
        StatusCode::BAD_REQUEST if key_invalid => BackendError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => BackendError::QuotaExceeded(message),
        s if s.is_server_error() => BackendError::Unavailable(message),
        _ => BackendError::Rejected(message),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::llm_client::complete;

    const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

    fn client_for(server: &MockServer, policy: BackendPolicy) -> GeminiClient {
        GeminiClient::new(server.uri(), DEFAULT_MODEL, policy).unwrap()
    }

    fn fast_policy() -> BackendPolicy {
        BackendPolicy {
            timeout: Some(Duration::from_secs(5)),
            max_retries: 0,
            backoff: Duration::from_millis(10),
        }
    }

    fn text_response(parts: &[&str]) -> serde_json::Value {
        let parts: Vec<_> = parts.iter().map(|t| json!({ "text": t })).collect();
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": parts },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 30 }
        })
    }

    #[tokio::test]
    async fn test_generate_returns_concatenated_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Analiza esto" }] }]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(text_response(&["## Informe", " 85%"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, fast_policy());
        let text = complete(&client, "Analiza esto", "test-key").await.unwrap();
        assert_eq!(text, "## Informe 85%");
    }

    #[tokio::test]
    async fn test_forbidden_is_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "Permission denied", "status": "PERMISSION_DENIED" }
            })))
            .mount(&server)
            .await;

        let err = complete(&client_for(&server, fast_policy()), "p", "bad")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Authentication(ref m) if m == "Permission denied"));
    }

    #[tokio::test]
    async fn test_invalid_key_bad_request_is_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT",
                    "details": [{ "reason": "API_KEY_INVALID" }]
                }
            })))
            .mount(&server)
            .await;

        let err = complete(&client_for(&server, fast_policy()), "p", "bad")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_other_bad_request_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "Request too large", "status": "INVALID_ARGUMENT" }
            })))
            .mount(&server)
            .await;

        let err = complete(&client_for(&server, fast_policy()), "p", "key")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Rejected(ref m) if m == "Request too large"));
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let err = complete(&client_for(&server, fast_policy()), "p", "key")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::QuotaExceeded(_)));
    }

    #[tokio::test]
    async fn test_server_error_retried_when_policy_allows() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let policy = BackendPolicy {
            max_retries: 2,
            ..fast_policy()
        };
        let err = complete(&client_for(&server, policy), "p", "key")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = complete(&client_for(&server, fast_policy()), "p", "key")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_no_candidates_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = complete(&client_for(&server, fast_policy()), "p", "key")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let err = complete(&client_for(&server, fast_policy()), "p", "key")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Blocked(ref m) if m.contains("SAFETY")));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_response(&["late"]))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let policy = BackendPolicy {
            timeout: Some(Duration::from_millis(100)),
            ..fast_policy()
        };
        let err = complete(&client_for(&server, policy), "p", "key")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Timeout(d) if d == Duration::from_millis(100)));
    }

    #[tokio::test]
    async fn test_blank_key_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&["x"])))
            .expect(0)
            .mount(&server)
            .await;

        let result = client_for(&server, fast_policy()).authenticate("   ").await;
        assert!(matches!(result, Err(BackendError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let client = GeminiClient::new("http://127.0.0.1:9", DEFAULT_MODEL, fast_policy()).unwrap();
        let err = complete(&client, "p", "key").await.unwrap_err();
        assert!(matches!(err, BackendError::Unavailable(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client =
            GeminiClient::new("https://example.test/", "gemini-pro", BackendPolicy::default())
                .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-pro:generateContent"
        );
    }
}
