//! Content-generation service boundary
//!
//! Trait-based abstraction over text-generation providers. The engine core
//! only builds [`GenerationRequest`] values; dispatching them through a
//! [`ContentBackend`] is the hosting application's job, which also owns any
//! retry or backoff policy around that boundary.

pub mod content;
mod openai_compatible;
mod types;

pub use openai_compatible::{DEEPSEEK_BASE_URL, HttpParams, OPENAI_BASE_URL, OpenAiCompatibleBackend};
pub use types::{ContentBackend, GenerationRequest, GenerationResult};

pub use classcheck_types::error::LlmError;

use classcheck_types::config::LlmSection;

/// Construct a backend for the configured provider.
///
/// Both supported providers speak the OpenAI-compatible chat-completions
/// format and differ only in endpoint and key variable:
///
/// | provider | default endpoint | default key variable |
/// |----------|------------------|----------------------|
/// | `openai` | `OPENAI_BASE_URL` | `OPENAI_API_KEY` |
/// | `deepseek` | `DEEPSEEK_BASE_URL` | `DEEPSEEK_API_KEY` |
///
/// # Errors
///
/// Returns [`LlmError::Unsupported`] for an unknown provider name and
/// [`LlmError::Misconfiguration`] when the selected provider's key variable
/// is unset or no model is configured.
pub fn backend_from_config(config: &LlmSection) -> Result<Box<dyn ContentBackend>, LlmError> {
    match config.provider.as_str() {
        "openai" => {
            let backend =
                OpenAiCompatibleBackend::from_config(config, "OPENAI_API_KEY", OPENAI_BASE_URL)?;
            Ok(Box::new(backend))
        }
        "deepseek" => {
            let backend = OpenAiCompatibleBackend::from_config(
                config,
                "DEEPSEEK_API_KEY",
                DEEPSEEK_BASE_URL,
            )?;
            Ok(Box::new(backend))
        }
        unknown => Err(LlmError::Unsupported(format!(
            "unknown content-generation provider '{unknown}'. Supported providers: openai, deepseek."
        ))),
    }
}
