use serde::Deserialize;

use crate::error::EngineError;

/// Pipeline configuration — parsed from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Target kinds. Conversion stops once the value falls under one of
    /// them.
    pub range: Vec<String>,

    /// Handler chain, in registration order. Order is the dispatch
    /// tie-break between equally specific handlers.
    #[serde(default)]
    pub handlers: Vec<HandlerConfig>,

    /// Upper bound on conversion steps. Unset means unbounded.
    #[serde(default)]
    pub step_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandlerConfig {
    /// Builtin catalog name.
    pub name: String,

    /// Domain override, kind names. Unset keeps the builtin's declared
    /// domain.
    #[serde(default)]
    pub domain: Option<Vec<String>>,
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::Config(format!("{path}: {e}")))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = PipelineConfig::parse(
            r#"
            range = ["int64"]
            step_limit = 8

            [[handlers]]
            name = "text-to-int64"

            [[handlers]]
            name = "float64-to-int64"
            domain = ["number"]
            "#,
        )
        .unwrap();

        assert_eq!(config.range, vec!["int64"]);
        assert_eq!(config.step_limit, Some(8));
        assert_eq!(config.handlers.len(), 2);
        assert_eq!(config.handlers[0].name, "text-to-int64");
        assert!(config.handlers[0].domain.is_none());
        assert_eq!(
            config.handlers[1].domain.as_deref(),
            Some(&["number".to_string()][..])
        );
    }

    #[test]
    fn handlers_and_step_limit_are_optional() {
        let config = PipelineConfig::parse(r#"range = ["text"]"#).unwrap();
        assert!(config.handlers.is_empty());
        assert!(config.step_limit.is_none());
    }

    #[test]
    fn missing_range_is_a_config_error() {
        let err = PipelineConfig::parse("step_limit = 3").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
