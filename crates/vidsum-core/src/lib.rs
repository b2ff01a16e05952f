//! vidsum-core: analysis and chat orchestration for a single video session.

pub mod session;

pub use session::{SessionError, SessionState, VideoSession, SUMMARY_PROMPT};
