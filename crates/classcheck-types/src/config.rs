//! Engine configuration.
//!
//! TOML configuration with `[framework]`, `[mastery]` and `[llm]` sections.
//! Every field has a default so an empty document is a valid configuration;
//! values are validated after parsing so a bad threshold fails at startup
//! rather than at evaluation time.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default collective mastery threshold (90%).
pub const DEFAULT_MASTERY_THRESHOLD: f64 = 0.9;

/// Default content-generation provider.
pub const DEFAULT_PROVIDER: &str = "openai";

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Framework source settings.
    #[serde(default)]
    pub framework: FrameworkSection,

    /// Mastery evaluation settings.
    #[serde(default)]
    pub mastery: MasterySection,

    /// Content-generation provider settings.
    #[serde(default)]
    pub llm: LlmSection,
}

/// `[framework]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FrameworkSection {
    /// Path to the referential YAML document.
    #[serde(default)]
    pub path: Option<String>,
}

/// `[mastery]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MasterySection {
    /// Collective mastery threshold in `[0, 1]`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for MasterySection {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MASTERY_THRESHOLD,
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_MASTERY_THRESHOLD
}

/// `[llm]` section.
///
/// `provider` selects the backend; the remaining fields configure it. The
/// API key itself never appears in configuration, only the name of the
/// environment variable that holds it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmSection {
    /// Provider name (e.g. "openai", "deepseek").
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier passed to the provider.
    #[serde(default)]
    pub model: Option<String>,

    /// Environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Custom endpoint, for OpenAI-compatible providers.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Maximum tokens per generation.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model: None,
            api_key_env: None,
            base_url: None,
            max_tokens: None,
            temperature: None,
            timeout_secs: None,
        }
    }
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

impl EngineConfig {
    /// Parse a configuration document and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the mastery threshold is outside
    /// `[0, 1]` or the temperature is negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.mastery.threshold;
        if !(0.0..=1.0).contains(&threshold) || threshold.is_nan() {
            return Err(ConfigError::Invalid {
                field: "mastery.threshold".to_string(),
                reason: format!("must be within [0, 1], got {threshold}"),
            });
        }

        if let Some(temperature) = self.llm.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ConfigError::Invalid {
                field: "llm.temperature".to_string(),
                reason: format!("must be within [0, 2], got {temperature}"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.mastery.threshold, DEFAULT_MASTERY_THRESHOLD);
        assert_eq!(config.llm.provider, "openai");
        assert!(config.framework.path.is_none());
    }

    #[test]
    fn full_document_parses() {
        let config = EngineConfig::from_toml_str(
            r#"
[framework]
path = "data/referentiels.yaml"

[mastery]
threshold = 0.8

[llm]
provider = "deepseek"
model = "deepseek-chat"
api_key_env = "DEEPSEEK_API_KEY"
base_url = "https://api.deepseek.com/v1/chat/completions"
max_tokens = 1024
temperature = 0.3
timeout_secs = 60
"#,
        )
        .unwrap();

        assert_eq!(config.framework.path.as_deref(), Some("data/referentiels.yaml"));
        assert_eq!(config.mastery.threshold, 0.8);
        assert_eq!(config.llm.provider, "deepseek");
        assert_eq!(config.llm.max_tokens, Some(1024));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = EngineConfig::from_toml_str("[mastery]\nthreshold = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "mastery.threshold"));

        assert!(EngineConfig::from_toml_str("[mastery]\nthreshold = -0.1\n").is_err());
    }

    #[test]
    fn boundary_thresholds_are_accepted() {
        assert!(EngineConfig::from_toml_str("[mastery]\nthreshold = 0.0\n").is_ok());
        assert!(EngineConfig::from_toml_str("[mastery]\nthreshold = 1.0\n").is_ok());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("[mastery\nthreshold = 0.9").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
