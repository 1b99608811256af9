use crate::{
    config::get_config,
    constants::{CHAT_COMPLETIONS_PATH, FAST_MODEL, VALIDATION_MAX_TOKENS},
    errors::{DraftError, DraftResult},
    logging::log_api_call,
    models::ApiCallLog,
};
use chrono::Utc;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// One request to the chat-completion endpoint, as produced by the
/// prompt builders.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: Option<String>,
    pub user_content: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Short tag used in the API call log.
    pub summary: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct WireChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Client for OpenAI-compatible chat-completion APIs.
///
/// Enforces a minimum spacing between consecutive calls; it never retries.
pub struct LlmClient {
    client: Client,
    base_url: String,
    api_key: String,
    min_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl LlmClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
        min_delay: Duration,
    ) -> DraftResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DraftError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            min_delay,
            last_request: Mutex::new(None),
        })
    }

    /// Builds a client from the process-wide configuration.
    pub fn from_config() -> DraftResult<Self> {
        let config = get_config();
        if config.api_key.trim().is_empty() {
            return Err(DraftError::config_error(format!(
                "No API key configured. Set {} or add it to the config file.",
                crate::constants::API_KEY_ENV_VAR
            )));
        }

        Self::new(
            &config.base_url,
            &config.api_key,
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_millis(config.rate_limit_delay_ms),
        )
    }

    fn endpoint(&self) -> String {
        if self.base_url.contains(CHAT_COMPLETIONS_PATH) {
            self.base_url.clone()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), CHAT_COMPLETIONS_PATH)
        }
    }

    async fn wait_for_slot(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_delay {
                let remaining = self.min_delay - elapsed;
                debug!("rate limiting: sleeping {}ms", remaining.as_millis());
                tokio::time::sleep(remaining).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Sends one completion request and returns the first choice's text.
    pub async fn chat_completion(&self, request: &CompletionRequest) -> DraftResult<Completion> {
        self.wait_for_slot().await;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt.as_deref() {
            messages.push(WireMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: &request.user_content,
        });

        let payload = WireRequest {
            model: &request.model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let url = self.endpoint();
        let start_time = Instant::now();

        let sent = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                warn!("{} request failed: {}", request.summary, e);
                return Err(DraftError::from(e));
            }
        };

        let status = response.status();
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: url,
            request_summary: format!("{} ({})", request.summary, request.model),
            response_status: status.as_u16(),
            response_time_ms: start_time.elapsed().as_millis(),
        });

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("{} returned {}: {}", request.summary, status, error_text);
            return Err(DraftError::from_status(status.as_u16(), error_text));
        }

        let body: WireResponse = response
            .json()
            .await
            .map_err(|e| DraftError::api_error(format!("Failed to parse API response: {}", e)))?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DraftError::api_error("No response content"))?
            .trim()
            .to_string();

        let usage = body.usage.map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });

        Ok(Completion { text, usage })
    }

    /// Sends a tiny request to check the key works.
    /// Failures keep their category, so a network outage is not reported
    /// as a bad key.
    pub async fn validate_api_key(&self) -> DraftResult<()> {
        let request = CompletionRequest {
            system_prompt: None,
            user_content: "test".to_string(),
            model: FAST_MODEL.to_string(),
            max_tokens: VALIDATION_MAX_TOKENS,
            temperature: 0.0,
            summary: "validate_api_key",
        };
        self.chat_completion(&request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn test_client(base_url: &str, delay_ms: u64) -> LlmClient {
        LlmClient::new(
            base_url,
            "test-api-key",
            Duration::from_secs(5),
            Duration::from_millis(delay_ms),
        )
        .unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system_prompt: Some("be helpful".to_string()),
            user_content: "hello".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            max_tokens: 64,
            temperature: 0.5,
            summary: "test",
        }
    }

    fn ok_body(text: &str) -> serde_json::Value {
        json!({
            "id": "cmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": text}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
        })
    }

    #[tokio::test]
    async fn test_completion_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(body_partial_json(json!({
                "model": "llama-3.1-8b-instant",
                "max_tokens": 64,
                "messages": [
                    {"role": "system", "content": "be helpful"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("  Hi!  ")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), 0);
        let completion = client.chat_completion(&request()).await.unwrap();

        assert_eq!(completion.text, "Hi!");
        assert_eq!(
            completion.usage,
            Some(TokenUsage {
                input_tokens: 10,
                output_tokens: 20
            })
        );
    }

    #[tokio::test]
    async fn test_system_prompt_is_optional() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("ok")))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), 0);
        let mut req = request();
        req.system_prompt = None;
        assert_eq!(client.chat_completion(&req).await.unwrap().text, "ok");
    }

    #[tokio::test]
    async fn test_error_statuses_are_categorised() {
        let cases = [
            (401, "auth"),
            (429, "rate"),
            (500, "server"),
            (418, "unknown"),
        ];

        for (status, kind) in cases {
            let mock_server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
                .mount(&mock_server)
                .await;

            let client = test_client(&mock_server.uri(), 0);
            let err = client.chat_completion(&request()).await.unwrap_err();
            let matched = match kind {
                "auth" => matches!(err, DraftError::Auth(_)),
                "rate" => matches!(err, DraftError::RateLimited(_)),
                "server" => matches!(err, DraftError::Server(_)),
                _ => matches!(err, DraftError::Unknown(_)),
            };
            assert!(matched, "status {} gave {:?}", status, err);
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_unknown_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), 0);
        let err = client.chat_completion(&request()).await.unwrap_err();
        assert!(matches!(err, DraftError::Unknown(_)));
        assert_eq!(err.user_message(), "❌ Error: No response content");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = test_client("http://127.0.0.1:1", 0);
        let err = client.chat_completion(&request()).await.unwrap_err();
        assert!(matches!(err, DraftError::Network(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_consecutive_calls_are_spaced() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("ok")))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri(), 300);
        let start = Instant::now();
        client.chat_completion(&request()).await.unwrap();
        client.chat_completion(&request()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_full_endpoint_url_is_used_verbatim() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("ok")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/v1/chat/completions", mock_server.uri());
        let client = test_client(&url, 0);
        assert!(client.chat_completion(&request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_api_key() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("ok")))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer wrong"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&mock_server)
            .await;

        let good = test_client(&mock_server.uri(), 0);
        assert!(good.validate_api_key().await.is_ok());

        let bad = LlmClient::new(
            &mock_server.uri(),
            "wrong",
            Duration::from_secs(5),
            Duration::ZERO,
        )
        .unwrap();
        assert!(matches!(bad.validate_api_key().await, Err(DraftError::Auth(_))));
    }

    #[tokio::test]
    async fn test_validate_api_key_keeps_network_category() {
        let client = test_client("http://127.0.0.1:1", 0);
        let err = client.validate_api_key().await.unwrap_err();
        assert!(matches!(err, DraftError::Network(_)), "got {:?}", err);
    }
}
