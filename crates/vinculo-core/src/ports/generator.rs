//! Text model port used by the draft generator.

use async_trait::async_trait;

use crate::error::GenerationError;

/// A hosted generative-text model: one prompt in, raw text out.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}
