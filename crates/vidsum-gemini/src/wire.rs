//! Wire types for the generateContent API.

use serde::{Deserialize, Serialize};

use vidsum_types::MediaPayload;

/// Inline media carried inside a request part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mime_type", alias = "mimeType")]
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// One part of a content turn: either text or inline media.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        rename = "inline_data",
        alias = "inlineData",
        skip_serializing_if = "Option::is_none"
    )]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn media(payload: &MediaPayload) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: payload.mime_type.clone(),
                data: payload.data.clone(),
            }),
        }
    }
}

/// An ordered list of parts attributed to one side of the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: "user".to_string(),
            parts,
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![Part::text(text)])
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or `None` when the
    /// response carries no text at all.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_field_names() {
        let payload = MediaPayload {
            data: "AAAA".into(),
            mime_type: "video/mp4".into(),
        };
        let req = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::media(&payload),
                Part::text("Summarize this video."),
            ])],
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(
            json["contents"][0]["parts"][0]["inline_data"]["mime_type"],
            "video/mp4"
        );
        assert_eq!(json["contents"][0]["parts"][0]["inline_data"]["data"], "AAAA");
        assert_eq!(json["contents"][0]["parts"][1]["text"], "Summarize this video.");
        // Unset part fields must not be serialized
        assert!(json["contents"][0]["parts"][1].get("inline_data").is_none());
    }

    #[test]
    fn test_response_deserialization_camel_case() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "## Overview\n"}, {"text": "A dog plays fetch."}]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            resp.first_text().as_deref(),
            Some("## Overview\nA dog plays fetch.")
        );
    }

    #[test]
    fn test_response_without_text() {
        let resp: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(resp.first_text().is_none());

        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"role": "model", "parts": []}}]}"#)
                .unwrap();
        assert!(resp.first_text().is_none());
    }

    #[test]
    fn test_inline_data_alias_round_trip() {
        // The API replies in camelCase; we accept both casings
        let part: Part =
            serde_json::from_str(r#"{"inlineData": {"mimeType": "video/webm", "data": "QQ=="}}"#)
                .unwrap();
        assert_eq!(part.inline_data.unwrap().mime_type, "video/webm");
    }
}
