//! Completion Client: the single point of entry for chat-completion calls.
//!
//! One call per invocation, no retries. The prompt travels as a single
//! system-role message against an OpenAI-compatible `/chat/completions`
//! endpoint. Credentials are passed in through [`ClientConfig`]; nothing here
//! reads process-wide state.
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod extract;

pub use extract::{extract_text, ChatCompletion, CompletionResponse, Usage};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Request timed out: {0}")]
    Timeout(reqwest::Error),

    #[error("Authentication failed (status {status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unexpected completion response structure: {raw}")]
    UnexpectedShape { raw: Value },
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout(err)
        } else {
            ServiceError::Http(err)
        }
    }
}

/// Connection settings for the completion service.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Per-call sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionParams {
    pub model: String,
    /// 0.0 is maximally deterministic.
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatRequest {
    /// A request with the prompt as its only message, in the system role.
    pub fn system_only(prompt: &str, params: &CompletionParams) -> Self {
        Self {
            model: params.model.clone(),
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: prompt.to_string(),
            }],
            temperature: params.temperature,
            max_tokens: params.max_output_tokens,
        }
    }
}

/// Sends one request and returns the undecoded response shape.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<CompletionResponse, ServiceError>;
}

/// reqwest-backed transport for OpenAI-compatible endpoints.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<CompletionResponse, ServiceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Completion API returned {status}");
            return Err(classify_status(status.as_u16(), &body));
        }

        Ok(CompletionResponse::Json(serde_json::from_str(&body)?))
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Maps a non-success status and body onto a [`ServiceError`].
fn classify_status(status: u16, body: &str) -> ServiceError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        401 | 403 => ServiceError::Authentication { status, message },
        429 => ServiceError::RateLimited { message },
        _ => ServiceError::Api { status, message },
    }
}

#[derive(Clone)]
pub struct CompletionClient {
    transport: Arc<dyn CompletionTransport>,
}

impl CompletionClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ServiceError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn CompletionTransport>) -> Self {
        Self { transport }
    }

    /// Sends `prompt` once and returns the extracted assistant text.
    pub async fn complete(
        &self,
        prompt: &str,
        model: &str,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<String, ServiceError> {
        let params = CompletionParams {
            model: model.to_string(),
            temperature,
            max_output_tokens,
        };
        let request = ChatRequest::system_only(prompt, &params);

        debug!(
            "Sending completion request: model={model}, temperature={temperature}, max_tokens={max_output_tokens}"
        );
        let response = self.transport.send(&request).await?;

        if let Some(usage) = response.usage() {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        extract_text(response)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubTransport;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_complete_sends_single_system_message() {
        let stub = StubTransport::json(json!({
            "choices": [{"message": {"role": "assistant", "content": "RESUME TEXT"}}]
        }));
        let client = CompletionClient::with_transport(stub.clone());

        let text = client
            .complete("the prompt", "gpt-4o-mini", 0.0, 1200)
            .await
            .unwrap();

        assert_eq!(text, "RESUME TEXT");
        assert_eq!(stub.calls(), 1);
        assert_eq!(
            stub.requests(),
            vec![ChatRequest {
                model: "gpt-4o-mini".to_string(),
                messages: vec![ChatMessage {
                    role: "system".to_string(),
                    content: "the prompt".to_string(),
                }],
                temperature: 0.0,
                max_tokens: 1200,
            }]
        );
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let stub = StubTransport::replying(|| {
            Err(ServiceError::RateLimited {
                message: "slow down".to_string(),
            })
        });
        let client = CompletionClient::with_transport(stub.clone());

        let err = client.complete("p", "m", 0.0, 10).await.unwrap_err();

        assert!(matches!(err, ServiceError::RateLimited { .. }));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_not_retried() {
        let stub = StubTransport::json(json!({"id": "cmpl-1"}));
        let client = CompletionClient::with_transport(stub.clone());

        let err = client.complete("p", "m", 0.0, 10).await.unwrap_err();

        assert!(matches!(err, ServiceError::UnexpectedShape { .. }));
        assert_eq!(stub.calls(), 1);
    }

    #[test]
    fn test_chat_request_wire_format() {
        let params = CompletionParams {
            model: "gpt-5-thinking-mini".to_string(),
            temperature: 0.0,
            max_output_tokens: 1200,
        };
        let body = serde_json::to_value(ChatRequest::system_only("hi", &params)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-5-thinking-mini",
                "messages": [{"role": "system", "content": "hi"}],
                "temperature": 0.0,
                "max_tokens": 1200
            })
        );
    }

    #[test]
    fn test_classify_status_auth() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        match classify_status(401, body) {
            ServiceError::Authentication { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Authentication, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_status_rate_limit_and_plain_body() {
        assert!(matches!(
            classify_status(429, "too many"),
            ServiceError::RateLimited { message } if message == "too many"
        ));
        assert!(matches!(
            classify_status(503, "<html>unavailable</html>"),
            ServiceError::Api { status: 503, message } if message == "<html>unavailable</html>"
        ));
    }

    /// Serves one canned HTTP response on a local port and hands back the
    /// raw request it received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut chunk = [0u8; 4096];
            while !request_complete(&received) {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&received).into_owned()
        });

        (format!("http://{addr}/v1"), handle)
    }

    fn request_complete(received: &[u8]) -> bool {
        let Some(header_end) = received.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&received[..header_end]);
        let content_length = headers
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        received.len() >= header_end + 4 + content_length
    }

    fn http_client(base_url: String) -> CompletionClient {
        CompletionClient::new(&ClientConfig {
            api_key: "sk-test".to_string(),
            base_url,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_http_transport_legacy_body() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"choices":[{"text":"LEGACY","index":0}]}"#).await;

        let text = http_client(base_url)
            .complete("the prompt", "gpt-4o-mini", 0.0, 50)
            .await
            .unwrap();
        assert_eq!(text, "LEGACY");

        let request = server.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("post /v1/chat/completions "));
        assert!(request.contains("authorization: bearer sk-test"));
        assert!(request.contains(r#""role":"system""#));
        assert!(request.contains(r#""content":"the prompt""#));
    }

    #[tokio::test]
    async fn test_http_transport_rate_limited() {
        let (base_url, _server) = serve_once(
            "429 Too Many Requests",
            r#"{"error":{"message":"slow","type":"rate_limit_exceeded"}}"#,
        )
        .await;

        let err = http_client(base_url)
            .complete("p", "m", 0.0, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::RateLimited { ref message } if message == "slow"));
    }

    #[tokio::test]
    async fn test_http_transport_unauthorized() {
        let (base_url, _server) = serve_once(
            "401 Unauthorized",
            r#"{"error":{"message":"Incorrect API key provided"}}"#,
        )
        .await;

        let err = http_client(base_url)
            .complete("p", "m", 0.0, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Authentication { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_http_transport_non_json_body() {
        let (base_url, _server) = serve_once("200 OK", "<html>gateway</html>").await;

        let err = http_client(base_url)
            .complete("p", "m", 0.0, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));
    }

    #[test]
    fn test_http_transport_endpoint_and_redacted_debug() {
        let config = ClientConfig {
            api_key: "sk-secret".to_string(),
            base_url: "http://localhost:8080/v1/".to_string(),
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.endpoint, "http://localhost:8080/v1/chat/completions");
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
