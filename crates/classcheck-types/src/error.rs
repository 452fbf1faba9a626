//! Error taxonomy for the classcheck engine.
//!
//! Every failure is an explicit result value; nothing is swallowed into a
//! default or success shape. The per-domain enums below map onto the error
//! kinds the engine surfaces to callers:
//!
//! | Kind | Meaning |
//! |------|---------|
//! | [`CompetencyNotFound`] | Requested id absent from the loaded framework |
//! | [`FrameworkError`] | Malformed or structurally invalid framework source |
//! | [`WorkflowError`] | Stage transition has no matching declared stage |
//! | [`LlmError`] | Content-generation dispatch failed |
//! | [`ConnectorError`] | Platform connector dispatch failed |
//!
//! The engine performs no retries for any of these; retry and backoff policy
//! belongs to the caller wrapping the external dispatch boundary.

use std::time::Duration;
use thiserror::Error;

/// A competency id that does not resolve in the loaded framework.
///
/// Surfaced as-is to the caller; the engine never substitutes a different
/// competency or builds a best-effort request for an unknown id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("competency '{id}' not found in the loaded framework")]
pub struct CompetencyNotFound {
    /// The id that failed to resolve.
    pub id: String,
}

impl CompetencyNotFound {
    /// Create a lookup failure for the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Structural failures while loading a competency framework.
///
/// Loading is all-or-nothing: the first structural violation aborts the load
/// and no partial framework is ever used.
#[derive(Debug, Error)]
pub enum FrameworkError {
    /// The source file could not be read.
    #[error("failed to read framework source '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The source document is not valid YAML in the expected shape.
    #[error("malformed framework source: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A competency declares no indicators.
    #[error("competency '{id}' declares no indicators")]
    MissingIndicators { id: String },

    /// Two competencies share an id across domains.
    ///
    /// Duplicate ids would make downstream lookups ambiguous, so the first
    /// duplicate detected aborts the load.
    #[error("duplicate competency id '{id}' across domains")]
    DuplicateId { id: String },
}

/// Failures in mastery-state handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MasteryError {
    /// An upstream progress label outside the closed enumeration.
    ///
    /// Unrecognized labels fail fast instead of silently counting as
    /// not-mastered.
    #[error("unknown mastery state label '{label}' (expected 'non commencé', 'en cours' or 'maîtrisé')")]
    UnknownStateLabel { label: String },
}

/// Failures in workflow stage sequencing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The completed-stage description matches no declared stage, or matches
    /// more than one. Orchestration halts rather than guessing a successor.
    #[error("completed stage '{completed}' does not unambiguously match a declared stage")]
    UnrecognizedStage { completed: String },
}

/// Failures from the content-generation service boundary.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure (HTTP connectivity, response decoding).
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider authentication failure (401, 403, missing API key).
    #[error("provider authentication error: {0}")]
    ProviderAuth(String),

    /// Provider quota or rate limit exceeded (429).
    #[error("provider quota exceeded: {0}")]
    ProviderQuota(String),

    /// Provider service outage (5xx errors).
    #[error("provider outage: {0}")]
    ProviderOutage(String),

    /// Invocation timed out.
    #[error("timeout after {duration:?}")]
    Timeout { duration: Duration },

    /// Configuration error (missing key, bad base URL).
    #[error("misconfiguration: {0}")]
    Misconfiguration(String),

    /// Unknown provider or unsupported feature.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Failures from platform connector dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorError {
    /// The external platform call failed. Always carries the connector name
    /// so callers can attribute the failure without parsing the message.
    #[error("{connector} connector failure: {message}")]
    Service { connector: String, message: String },
}

impl ConnectorError {
    /// Create a service failure for the named connector.
    #[must_use]
    pub fn service(connector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            connector: connector.into(),
            message: message.into(),
        }
    }
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document failed to parse.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field parsed but carries an out-of-range or inconsistent value.
    #[error("invalid configuration value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// Umbrella error for library consumers that work across components.
///
/// Component crates return their own domain errors; this type exists for
/// callers that thread several components together and want one `?`-friendly
/// error path.
#[derive(Debug, Error)]
pub enum ClasscheckError {
    #[error("framework error: {0}")]
    Framework(#[from] FrameworkError),

    #[error(transparent)]
    CompetencyNotFound(#[from] CompetencyNotFound),

    #[error("mastery error: {0}")]
    Mastery(#[from] MasteryError),

    #[error("workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("content generation error: {0}")]
    Llm(#[from] LlmError),

    #[error("connector error: {0}")]
    Connector(#[from] ConnectorError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn competency_not_found_display_names_the_id() {
        let err = CompetencyNotFound::new("X9.9");
        assert_eq!(
            err.to_string(),
            "competency 'X9.9' not found in the loaded framework"
        );
    }

    #[test]
    fn umbrella_error_preserves_lookup_message() {
        let err: ClasscheckError = CompetencyNotFound::new("D1.3").into();
        assert_eq!(
            err.to_string(),
            "competency 'D1.3' not found in the loaded framework"
        );
    }

    #[test]
    fn unrecognized_stage_display() {
        let err = WorkflowError::UnrecognizedStage {
            completed: "Étape Z".to_string(),
        };
        assert!(err.to_string().contains("Étape Z"));
    }

    #[test]
    fn connector_error_carries_connector_name() {
        let err = ConnectorError::service("mail", "SMTP relay refused connection");
        assert_eq!(
            err.to_string(),
            "mail connector failure: SMTP relay refused connection"
        );
    }
}
