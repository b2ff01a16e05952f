//! vidsum-gemini: Gemini generateContent client and conversation handle.

pub mod client;
pub mod wire;

pub use client::{GeminiAnalyzer, GeminiChat, GeminiClient};
