//! Core types for the content-generation service boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use classcheck_types::error::LlmError;

/// A structured prompt ready for dispatch to the content-generation service.
///
/// The engine builds these; it never dispatches them itself. The request is
/// a pure value: two pieces of text and nothing else, so a request built
/// from the same inputs is always identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System-level role given to the service (e.g. "Vous êtes un tuteur IA
    /// expert en pédagogie.").
    pub system_role: String,
    /// The user prompt carrying the full task context.
    pub user_prompt: String,
}

impl GenerationRequest {
    /// Create a request from a system role and user prompt.
    #[must_use]
    pub fn new(system_role: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_role: system_role.into(),
            user_prompt: user_prompt.into(),
        }
    }
}

/// Result of one content-generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Raw response text from the service. Parsing beyond this is
    /// best-effort and belongs to the caller.
    pub text: String,
    /// Provider that served the request (e.g. "openai", "deepseek").
    pub provider: String,
    /// Model that was actually used.
    pub model_used: String,
    /// Input tokens consumed, if the provider reports them.
    pub tokens_input: Option<u64>,
    /// Output tokens generated, if the provider reports them.
    pub tokens_output: Option<u64>,
}

impl GenerationResult {
    /// Create a result with no token accounting.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        provider: impl Into<String>,
        model_used: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            provider: provider.into(),
            model_used: model_used.into(),
            tokens_input: None,
            tokens_output: None,
        }
    }

    /// Set token counts.
    #[must_use]
    pub fn with_tokens(mut self, input: u64, output: u64) -> Self {
        self.tokens_input = Some(input);
        self.tokens_output = Some(output);
        self
    }
}

/// Trait for content-generation backends.
///
/// All providers implement this trait, so callers dispatch requests without
/// knowing which vendor serves them. Implementations perform exactly one
/// attempt per call: retry and backoff policy belongs to the caller wrapping
/// this boundary.
#[async_trait]
pub trait ContentBackend: Send + Sync + std::fmt::Debug {
    /// Dispatch one generation request.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] for any failure: transport problems, provider
    /// auth/quota/outage responses, or timeouts. Failures are surfaced with
    /// context and never retried here.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_a_pure_value() {
        let a = GenerationRequest::new("role", "prompt");
        let b = GenerationRequest::new("role", "prompt");
        assert_eq!(a, b);
    }

    #[test]
    fn result_builder_sets_tokens() {
        let result = GenerationResult::new("text", "openai", "gpt-4").with_tokens(10, 20);
        assert_eq!(result.tokens_input, Some(10));
        assert_eq!(result.tokens_output, Some(20));
    }

    /// Echo backend standing in for a real provider.
    #[derive(Debug)]
    struct EchoBackend;

    #[async_trait]
    impl ContentBackend for EchoBackend {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GenerationResult, LlmError> {
            Ok(GenerationResult::new(
                request.user_prompt.clone(),
                "echo",
                "echo-1",
            ))
        }
    }

    #[tokio::test]
    async fn backends_dispatch_through_trait_objects() {
        let backend: Box<dyn ContentBackend> = Box::new(EchoBackend);
        let request = GenerationRequest::new("rôle", "Dis bonjour en français.");

        let result = backend.generate(&request).await.unwrap();
        assert_eq!(result.text, "Dis bonjour en français.");
        assert_eq!(result.provider, "echo");
    }
}
