//! Hosted text model clients.

mod gemini;

pub use gemini::{GeminiClient, GeminiConfig};
