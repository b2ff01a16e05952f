//! Single-video session management.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use vidsum_media::MediaError;
use vidsum_types::{
    AnalyzeRequest, ChatHandle, MediaPayload, ServiceError, TranscriptEntry, VideoAnalyzer,
};

/// Instructional prompt sent with every analysis request.
pub static SUMMARY_PROMPT: &str = r#"
  You are a video analyst. Watch the attached video and summarize it.

  OUTPUT: Markdown using exactly this structure:

  ## Overview
  One short paragraph describing what the video shows.

  ## Key Moments
  - **<timestamp or label>:** what happens at that point

  ## Takeaways
  - one bullet per takeaway

  RULES:
  - Use "## " for section headings and "- " for bullets, nothing else
  - Bold only the label part of a "- **Label:** detail" bullet
  - Describe only what is observable in the video
"#;

/// Where the session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No video loaded.
    Idle,
    /// A payload is loaded but not yet analyzed.
    Uploaded,
    /// The one-shot analysis call is in flight.
    Analyzing,
    /// Analysis succeeded; follow-up chat is available.
    Analyzed,
    /// A follow-up call is in flight.
    Chatting,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Idle => "idle",
            SessionState::Uploaded => "uploaded",
            SessionState::Analyzing => "analyzing",
            SessionState::Analyzed => "analyzed",
            SessionState::Chatting => "chatting",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("cannot {operation} in the {state} state")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}

/// Orchestrates one video's analysis and follow-up conversation.
///
/// Holds at most one conversation at a time. The chat handle exists if
/// and only if a summary exists; loading a new video or resetting drops
/// both together with the transcript. Methods take `&mut self`, so a
/// second operation cannot be dispatched while one is in flight.
pub struct VideoSession {
    analyzer: Arc<dyn VideoAnalyzer>,
    advisory_max_bytes: u64,
    state: SessionState,
    payload: Option<MediaPayload>,
    summary: Option<String>,
    chat: Option<Box<dyn ChatHandle>>,
    transcript: Vec<TranscriptEntry>,
}

impl VideoSession {
    pub fn new(analyzer: Arc<dyn VideoAnalyzer>, advisory_max_bytes: u64) -> Self {
        Self {
            analyzer,
            advisory_max_bytes,
            state: SessionState::Idle,
            payload: None,
            summary: None,
            chat: None,
            transcript: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn payload(&self) -> Option<&MediaPayload> {
        self.payload.as_ref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn has_chat(&self) -> bool {
        self.chat.is_some()
    }

    /// Load a new payload, discarding any previous analysis, conversation
    /// and transcript wholesale.
    pub fn load_video(&mut self, payload: MediaPayload) {
        self.payload = Some(payload);
        self.clear_derived_state();
        self.state = SessionState::Uploaded;
    }

    /// Encode a video file and load it.
    pub fn load_video_file(&mut self, path: &Path) -> Result<(), SessionError> {
        let payload = vidsum_media::encode_file(path, self.advisory_max_bytes)?;
        self.load_video(payload);
        Ok(())
    }

    /// Discard the payload and all derived state.
    pub fn reset(&mut self) {
        self.payload = None;
        self.clear_derived_state();
        self.state = SessionState::Idle;
    }

    /// Run the one-shot analysis for the loaded payload.
    ///
    /// On success the session moves to [`SessionState::Analyzed`] and the
    /// summary is returned; on failure it drops back to
    /// [`SessionState::Uploaded`] with no conversation constructed.
    pub async fn start_analysis(&mut self) -> Result<String, SessionError> {
        if self.state != SessionState::Uploaded {
            return Err(SessionError::InvalidState {
                operation: "start analysis",
                state: self.state,
            });
        }
        let Some(payload) = self.payload.clone() else {
            return Err(SessionError::InvalidState {
                operation: "start analysis",
                state: self.state,
            });
        };

        self.state = SessionState::Analyzing;
        tracing::info!(
            provider = self.analyzer.id(),
            mime_type = %payload.mime_type,
            "Starting video analysis"
        );

        let req = AnalyzeRequest {
            payload,
            prompt: SUMMARY_PROMPT.to_string(),
        };
        match self.analyzer.analyze(req).await {
            Ok(analysis) => {
                self.summary = Some(analysis.summary.clone());
                self.chat = Some(analysis.chat);
                self.transcript.clear();
                self.state = SessionState::Analyzed;
                tracing::info!("Video analysis complete");
                Ok(analysis.summary)
            }
            Err(e) => {
                self.state = SessionState::Uploaded;
                tracing::warn!("Video analysis failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Send a follow-up question through the established conversation.
    ///
    /// The user's turn is always recorded; on failure the reply slot is
    /// filled with an `Error: ...` model turn so the transcript stays a
    /// faithful record of what happened.
    pub async fn send_followup(&mut self, message: &str) -> Result<String, SessionError> {
        if self.state != SessionState::Analyzed {
            return Err(SessionError::InvalidState {
                operation: "send a follow-up",
                state: self.state,
            });
        }
        let Some(mut chat) = self.chat.take() else {
            return Err(SessionError::InvalidState {
                operation: "send a follow-up",
                state: self.state,
            });
        };

        self.transcript.push(TranscriptEntry::user(message));
        self.state = SessionState::Chatting;

        let result = chat.send(message).await;

        self.chat = Some(chat);
        self.state = SessionState::Analyzed;

        match result {
            Ok(reply) => {
                self.transcript.push(TranscriptEntry::model(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                tracing::warn!("Follow-up failed: {e}");
                self.transcript
                    .push(TranscriptEntry::model(format!("Error: {e}")));
                Err(e.into())
            }
        }
    }

    fn clear_derived_state(&mut self) {
        self.summary = None;
        self.chat = None;
        self.transcript.clear();
    }
}
