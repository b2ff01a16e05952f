use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ──────────────────── Media Types ────────────────────

/// Encoded media content plus content type, ready for transmission
/// to the remote inference service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaPayload {
    /// Base64-encoded file bytes.
    pub data: String,
    /// Declared MIME type (e.g. "video/mp4").
    pub mime_type: String,
}

// ──────────────────── Transcript Types ────────────────────

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

/// One entry in the user-visible follow-up transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
    /// Entry timestamp (unix millis).
    pub timestamp: i64,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

// ──────────────────── Analysis Types ────────────────────

/// A one-shot analysis request: exactly one payload plus one
/// instructional prompt.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub payload: MediaPayload,
    pub prompt: String,
}

/// Result of a successful analysis: the summary text and a conversation
/// handle already seeded with the (request, summary) exchange.
pub struct Analysis {
    pub summary: String,
    pub chat: Box<dyn ChatHandle>,
}

// ──────────────────── Service Errors ────────────────────

/// Errors surfaced by remote inference calls.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Transport failure or the service rejected the call outright.
    #[error("service unavailable: {message}")]
    Unavailable { message: String },

    /// The credential was rejected.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// The service refused the request content (e.g. wrong media type).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The service replied, but not in the shape we expect.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
}

// ──────────────────── Provider Traits ────────────────────

/// An established conversation with the inference service, anchoring an
/// ordered exchange history. The seeding history is internal to the
/// handle; callers only see replies to messages they send.
#[async_trait]
pub trait ChatHandle: Send {
    /// Append `message` as a user turn, request continuation, and return
    /// the model's reply.
    async fn send(&mut self, message: &str) -> Result<String, ServiceError>;
}

/// Trait for video analysis providers.
#[async_trait]
pub trait VideoAnalyzer: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &str;

    /// Run the one-shot analysis. On success the returned [`Analysis`]
    /// carries a chat handle seeded with exactly the request content and
    /// the summary reply; on failure nothing is constructed.
    async fn analyze(&self, req: AnalyzeRequest) -> Result<Analysis, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_payload_serde() {
        let payload = MediaPayload {
            data: "aGVsbG8=".into(),
            mime_type: "video/mp4".into(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        let parsed: MediaPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.data, "aGVsbG8=");
        assert_eq!(parsed.mime_type, "video/mp4");
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
        let parsed: Role = serde_json::from_str("\"model\"").unwrap();
        assert_eq!(parsed, Role::Model);
    }

    #[test]
    fn test_transcript_entry_constructors() {
        let user = TranscriptEntry::user("what happens at 1:30?");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.text, "what happens at 1:30?");
        assert!(user.timestamp > 0);

        let model = TranscriptEntry::model("A dog appears.");
        assert_eq!(model.role, Role::Model);
    }

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::Auth {
            message: "API key not valid".into(),
        };
        assert_eq!(err.to_string(), "authentication failed: API key not valid");

        let err = ServiceError::InvalidInput {
            message: "unsupported mime type".into(),
        };
        assert!(err.to_string().starts_with("invalid input:"));
    }
}
