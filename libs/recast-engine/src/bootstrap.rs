use recast_api::handler::Handler;
use recast_api::kind::Kind;

use crate::catalog;
use crate::config::{HandlerConfig, PipelineConfig};
use crate::converter::Converter;
use crate::error::EngineError;

/// Assemble a converter from a parsed configuration.
///
/// Handlers are built from the catalog and registered in declaration
/// order.
pub fn bootstrap(config: &PipelineConfig) -> Result<Converter, EngineError> {
    let range = parse_kinds(&config.range)?;
    let mut converter = Converter::with_range(range)?;

    if let Some(limit) = config.step_limit {
        converter.set_step_limit(limit);
    }

    for handler_cfg in &config.handlers {
        let handler = build_handler(handler_cfg)
            .map_err(|e| e.with_context(format!("handler '{}'", handler_cfg.name)))?;
        tracing::info!(handler = %handler_cfg.name, domain = ?handler.domain(), "registered handler");
        converter.register_handler(handler);
    }

    Ok(converter)
}

/// Build one handler from config: catalog lookup + optional domain
/// override.
fn build_handler(cfg: &HandlerConfig) -> Result<Handler, EngineError> {
    let mut handler = catalog::build(&cfg.name)?;
    if let Some(ref names) = cfg.domain {
        handler.set_domain(parse_kinds(names)?);
    }
    Ok(handler)
}

fn parse_kinds(names: &[String]) -> Result<Vec<Kind>, EngineError> {
    names.iter().map(|name| parse_kind(name)).collect()
}

/// Parse kind name string → Kind enum.
pub fn parse_kind(s: &str) -> Result<Kind, EngineError> {
    match s {
        "any" => Ok(Kind::Any),
        "scalar" => Ok(Kind::Scalar),
        "number" => Ok(Kind::Number),
        "integer" => Ok(Kind::Integer),
        "int64" => Ok(Kind::Int64),
        "uint64" => Ok(Kind::UInt64),
        "float64" => Ok(Kind::Float64),
        "decimal" => Ok(Kind::Decimal),
        "bool" => Ok(Kind::Bool),
        "timestamp" => Ok(Kind::Timestamp),
        "text" => Ok(Kind::Text),
        "bytes" => Ok(Kind::Bytes),
        "sequence" => Ok(Kind::Sequence),
        "mapping" => Ok(Kind::Mapping),
        "null" => Ok(Kind::Null),
        other => Err(EngineError::Config(format!("unknown kind: '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use recast_api::value::Value;

    use super::*;
    use crate::config::PipelineConfig;

    #[test]
    fn parse_kind_roundtrips_display_names() {
        for kind in [
            Kind::Any,
            Kind::Scalar,
            Kind::Number,
            Kind::Integer,
            Kind::Int64,
            Kind::UInt64,
            Kind::Float64,
            Kind::Decimal,
            Kind::Bool,
            Kind::Timestamp,
            Kind::Text,
            Kind::Bytes,
            Kind::Sequence,
            Kind::Mapping,
            Kind::Null,
        ] {
            assert_eq!(parse_kind(kind.name()).unwrap(), kind);
        }
        assert!(parse_kind("int32").is_err());
    }

    #[test]
    fn bootstrap_builds_working_converter() {
        let config = PipelineConfig::parse(
            r#"
            range = ["int64"]

            [[handlers]]
            name = "text-to-int64"

            [[handlers]]
            name = "float64-to-int64"
            "#,
        )
        .unwrap();

        let converter = bootstrap(&config).unwrap();
        assert_eq!(converter.range(), &[Kind::Int64]);
        assert_eq!(converter.handlers().len(), 2);
        assert_eq!(converter.convert(Value::Text("42".into())).unwrap(), Value::Int64(42));
        assert_eq!(converter.convert(Value::Float64(3.7)).unwrap(), Value::Int64(4));
    }

    #[test]
    fn domain_override_is_applied() {
        let config = PipelineConfig::parse(
            r#"
            range = ["int64"]

            [[handlers]]
            name = "text-to-int64"
            domain = ["text", "bytes"]
            "#,
        )
        .unwrap();

        let converter = bootstrap(&config).unwrap();
        assert_eq!(converter.handlers()[0].domain(), &[Kind::Text, Kind::Bytes]);
    }

    #[test]
    fn unknown_handler_name_fails_with_context() {
        let config = PipelineConfig::parse(
            r#"
            range = ["int64"]

            [[handlers]]
            name = "frobnicate"
            "#,
        )
        .unwrap();

        let err = bootstrap(&config).unwrap_err();
        assert!(err.to_string().contains("handler 'frobnicate'"));
    }

    #[test]
    fn unknown_range_kind_is_a_config_error() {
        let config = PipelineConfig::parse(r#"range = ["i64"]"#).unwrap();
        let err = bootstrap(&config).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
