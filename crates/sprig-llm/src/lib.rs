//! Text generation for Sprig.
//!
//! The external model is treated as an opaque collaborator: a prompt goes
//! in, generated text comes out, or the call fails. There is deliberately no
//! retry policy; a single failure is reported to the caller, which
//! substitutes the fixed fallback reply.

mod error;
mod gemini;

pub use error::{LlmError, LlmResult};
pub use gemini::{GeminiClient, GeminiConfig};

use async_trait::async_trait;

/// One successful generation.
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,
    pub tokens_used: u32,
}

/// Interface to a hosted text-generation model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for a single text prompt.
    async fn generate(&self, prompt: &str) -> LlmResult<Generation>;
}
