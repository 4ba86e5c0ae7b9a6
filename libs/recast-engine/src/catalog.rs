use recast_api::error::ConvertError;
use recast_api::handler::Handler;
use recast_api::kind::Kind;
use recast_api::value::Value;

use crate::error::EngineError;

/// Builtin conversion handlers, referenced by name from the pipeline
/// config.
///
/// Two builtins can declare the same domain (`text-to-int64` and
/// `text-to-float64` both accept text); which one runs is then decided by
/// registration order, so config order matters.
pub const NAMES: &[&str] = &[
    "text-to-int64",
    "text-to-float64",
    "text-to-json",
    "bytes-to-text",
    "float64-to-int64",
    "bool-to-int64",
    "integer-to-float64",
    "decimal-to-float64",
    "timestamp-to-int64",
];

/// Build a builtin handler by catalog name.
pub fn build(name: &str) -> Result<Handler, EngineError> {
    let handler = match name {
        "text-to-int64" => Handler::new(vec![Kind::Text], text_to_int64),
        "text-to-float64" => Handler::new(vec![Kind::Text], text_to_float64),
        "text-to-json" => Handler::new(vec![Kind::Text], text_to_json),
        "bytes-to-text" => Handler::new(vec![Kind::Bytes], bytes_to_text),
        "float64-to-int64" => Handler::new(vec![Kind::Float64], float64_to_int64),
        "bool-to-int64" => Handler::new(vec![Kind::Bool], bool_to_int64),
        "integer-to-float64" => Handler::new(vec![Kind::Integer], integer_to_float64),
        "decimal-to-float64" => Handler::new(vec![Kind::Decimal], decimal_to_float64),
        "timestamp-to-int64" => Handler::new(vec![Kind::Timestamp], timestamp_to_int64),
        other => {
            return Err(EngineError::UnknownHandler(format!(
                "'{other}' (known: {})",
                NAMES.join(", ")
            )));
        }
    };
    Ok(handler)
}

/// Unexpected input kind: only reachable when a config override widens a
/// builtin's domain past what its function handles.
fn unexpected(name: &str, value: &Value) -> ConvertError {
    ConvertError::handler(format!("{name}: unexpected input kind {}", value.kind()))
}

fn text_to_int64(value: Value) -> Result<Value, ConvertError> {
    match value {
        Value::Text(s) => Ok(Value::Int64(s.trim().parse()?)),
        other => Err(unexpected("text-to-int64", &other)),
    }
}

fn text_to_float64(value: Value) -> Result<Value, ConvertError> {
    match value {
        Value::Text(s) => Ok(Value::Float64(s.trim().parse()?)),
        other => Err(unexpected("text-to-float64", &other)),
    }
}

fn text_to_json(value: Value) -> Result<Value, ConvertError> {
    match value {
        Value::Text(s) => {
            let json: serde_json::Value = serde_json::from_str(&s)?;
            Ok(Value::from(json))
        }
        other => Err(unexpected("text-to-json", &other)),
    }
}

fn bytes_to_text(value: Value) -> Result<Value, ConvertError> {
    match value {
        Value::Bytes(bytes) => Ok(Value::Text(String::from_utf8(bytes)?)),
        other => Err(unexpected("bytes-to-text", &other)),
    }
}

fn float64_to_int64(value: Value) -> Result<Value, ConvertError> {
    match value {
        Value::Float64(f) => {
            let rounded = f.round();
            if !rounded.is_finite()
                || rounded < i64::MIN as f64
                || rounded > i64::MAX as f64
            {
                return Err(ConvertError::handler(format!(
                    "float64-to-int64: {f} does not fit in int64"
                )));
            }
            Ok(Value::Int64(rounded as i64))
        }
        other => Err(unexpected("float64-to-int64", &other)),
    }
}

fn bool_to_int64(value: Value) -> Result<Value, ConvertError> {
    match value {
        Value::Bool(b) => Ok(Value::Int64(i64::from(b))),
        other => Err(unexpected("bool-to-int64", &other)),
    }
}

fn integer_to_float64(value: Value) -> Result<Value, ConvertError> {
    match value {
        Value::Int64(i) => Ok(Value::Float64(i as f64)),
        Value::UInt64(u) => Ok(Value::Float64(u as f64)),
        other => Err(unexpected("integer-to-float64", &other)),
    }
}

fn decimal_to_float64(value: Value) -> Result<Value, ConvertError> {
    match value {
        Value::Decimal(raw, scale) => {
            Ok(Value::Float64(raw as f64 / 10f64.powi(i32::from(scale))))
        }
        other => Err(unexpected("decimal-to-float64", &other)),
    }
}

fn timestamp_to_int64(value: Value) -> Result<Value, ConvertError> {
    match value {
        Value::Timestamp(micros, _) => Ok(Value::Int64(micros)),
        other => Err(unexpected("timestamp-to-int64", &other)),
    }
}

#[cfg(test)]
mod tests {
    use recast_api::error::ErrorKind;

    use super::*;

    #[test]
    fn every_name_builds() {
        for name in NAMES {
            assert!(build(name).is_ok(), "builtin '{name}' failed to build");
        }
    }

    #[test]
    fn unknown_name_lists_known_handlers() {
        let err = build("no-such-handler").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("no-such-handler"));
        assert!(msg.contains("text-to-int64"));
    }

    #[test]
    fn text_parsers() {
        let h = build("text-to-int64").unwrap();
        assert_eq!(h.apply(Value::Text(" 42 ".into())).unwrap(), Value::Int64(42));
        let err = h.apply(Value::Text("nope".into())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Handler);

        let h = build("text-to-float64").unwrap();
        assert_eq!(h.apply(Value::Text("2.5".into())).unwrap(), Value::Float64(2.5));
    }

    #[test]
    fn json_decode_builds_value_tree() {
        let h = build("text-to-json").unwrap();
        let out = h.apply(Value::Text(r#"{"id": 7, "tags": ["a"]}"#.into())).unwrap();
        assert_eq!(
            out,
            Value::Map(vec![
                (Value::Text("id".into()), Value::Int64(7)),
                (Value::Text("tags".into()), Value::Array(vec![Value::Text("a".into())])),
            ])
        );
    }

    #[test]
    fn float_rounding_is_half_away_from_zero() {
        let h = build("float64-to-int64").unwrap();
        assert_eq!(h.apply(Value::Float64(3.7)).unwrap(), Value::Int64(4));
        assert_eq!(h.apply(Value::Float64(-2.5)).unwrap(), Value::Int64(-3));
        assert!(h.apply(Value::Float64(f64::NAN)).is_err());
        assert!(h.apply(Value::Float64(1e300)).is_err());
    }

    #[test]
    fn numeric_widening_and_narrowing() {
        let h = build("integer-to-float64").unwrap();
        assert_eq!(h.apply(Value::Int64(-3)).unwrap(), Value::Float64(-3.0));
        assert_eq!(h.apply(Value::UInt64(3)).unwrap(), Value::Float64(3.0));

        let h = build("decimal-to-float64").unwrap();
        assert_eq!(h.apply(Value::Decimal(12345, 2)).unwrap(), Value::Float64(123.45));

        let h = build("timestamp-to-int64").unwrap();
        assert_eq!(h.apply(Value::Timestamp(1_000, 6)).unwrap(), Value::Int64(1_000));
    }

    #[test]
    fn bytes_decode() {
        let h = build("bytes-to-text").unwrap();
        assert_eq!(h.apply(Value::Bytes(b"hi".to_vec())).unwrap(), Value::Text("hi".into()));
        let err = h.apply(Value::Bytes(vec![0xff, 0xfe])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Handler);
    }

    #[test]
    fn out_of_domain_input_is_a_handler_error() {
        let h = build("bool-to-int64").unwrap();
        let err = h.apply(Value::Text("true".into())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Handler);
    }
}
