//! HTTP client for the generateContent API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use vidsum_config::VidsumConfig;
use vidsum_types::{Analysis, AnalyzeRequest, ChatHandle, ServiceError, VideoAnalyzer};

use crate::wire::{Content, GenerateContentRequest, GenerateContentResponse, Part};

/// HTTP client for the generateContent API.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new API client with the given credential.
    pub fn new(config: &VidsumConfig, api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build reqwest client");
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        }
    }

    /// Post the given conversation and return the model's reply text.
    pub async fn generate_content(&self, contents: &[Content]) -> Result<String, ServiceError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateContentRequest {
            contents: contents.to_vec(),
        };

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::Unavailable {
                message: format!("generateContent request failed: {e}"),
            })?;

        let status = resp.status();
        let body: serde_json::Value =
            resp.json().await.map_err(|e| ServiceError::Unavailable {
                message: format!("generateContent response read failed: {e}"),
            })?;

        if !status.is_success() {
            tracing::warn!(status = %status, "generateContent returned an error");
            return Err(error_for_status(status, &body));
        }

        let response: GenerateContentResponse =
            serde_json::from_value(body).map_err(|e| ServiceError::MalformedResponse {
                message: format!("unexpected response shape: {e}"),
            })?;

        response.first_text().ok_or(ServiceError::MalformedResponse {
            message: "response contained no candidate text".to_string(),
        })
    }
}

/// Map a non-success status onto the service error taxonomy, using the
/// JSON error body's message when present.
fn error_for_status(status: StatusCode, body: &serde_json::Value) -> ServiceError {
    let message = body
        .pointer("/error/message")
        .and_then(|m| m.as_str())
        .unwrap_or("unknown error")
        .to_string();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ServiceError::Auth { message },
        StatusCode::BAD_REQUEST => ServiceError::InvalidInput { message },
        _ => ServiceError::Unavailable { message },
    }
}

/// A continuable conversation anchored on an earlier exchange.
///
/// The full history travels with every continuation call; the media
/// payload is only ever part of the seeding turn, so it is transmitted
/// exactly once.
pub struct GeminiChat {
    client: GeminiClient,
    history: Vec<Content>,
}

impl GeminiChat {
    fn new(client: GeminiClient, history: Vec<Content>) -> Self {
        Self { client, history }
    }
}

#[async_trait]
impl ChatHandle for GeminiChat {
    async fn send(&mut self, message: &str) -> Result<String, ServiceError> {
        self.history.push(Content::user_text(message));
        match self.client.generate_content(&self.history).await {
            Ok(reply) => {
                self.history.push(Content::model_text(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                // Keep the held history answered-only
                self.history.pop();
                Err(e)
            }
        }
    }
}

/// Gemini-backed video analysis provider.
pub struct GeminiAnalyzer {
    client: GeminiClient,
}

impl GeminiAnalyzer {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VideoAnalyzer for GeminiAnalyzer {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn analyze(&self, req: AnalyzeRequest) -> Result<Analysis, ServiceError> {
        let seed = Content::user(vec![Part::media(&req.payload), Part::text(&req.prompt)]);

        let summary = self.client.generate_content(&[seed.clone()]).await?;

        let history = vec![seed, Content::model_text(summary.clone())];
        let chat = GeminiChat::new(self.client.clone(), history);

        Ok(Analysis {
            summary,
            chat: Box::new(chat),
        })
    }
}
