use crate::kind::Kind;

/// Canonical value representation.
///
/// Strategy by type:
/// - Scalars (Int64, UInt64, Float64, Bool): plain machine words
/// - Decimal, Timestamp: pre-parsed `(raw, scale/precision)` layout
/// - Text, Bytes: owned buffers; every conversion step produces a fresh
///   value, so there is no source buffer to borrow from
/// - Array, Map: recursive
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int64(i64),
    UInt64(u64),
    Float64(f64),
    Bool(bool),
    /// `(value, scale)` — fixed-point decimal.
    Decimal(i128, u8),
    /// `(micros, precision)`.
    Timestamp(i64, u8),

    /// Owned UTF-8 text.
    Text(String),
    /// Opaque binary data (UUID, IP, JSONB, etc.).
    Bytes(Vec<u8>),

    /// Recursive — elements converted individually, if at all.
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),

    Null,
}

impl Value {
    /// Leaf kind of this value.
    pub fn kind(&self) -> Kind {
        Kind::of(self)
    }
}

// ---------------------------------------------------------------------------
// JSON bridge: serde_json::Value ↔ Value
// ---------------------------------------------------------------------------

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt64(u)
                } else {
                    // Finite by construction: serde_json numbers are never NaN/inf.
                    Value::Float64(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Value::Text(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Int64(i) => serde_json::Value::from(i),
            Value::UInt64(u) => serde_json::Value::from(u),
            Value::Float64(f) => serde_json::Value::from(f),
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Decimal(raw, scale) => {
                serde_json::Value::String(decimal_string(raw, scale))
            }
            Value::Timestamp(micros, _) => serde_json::Value::from(micros),
            Value::Text(s) => serde_json::Value::String(s),
            Value::Bytes(bytes) => serde_json::Value::Array(
                bytes.into_iter().map(serde_json::Value::from).collect(),
            ),
            Value::Array(items) => serde_json::Value::Array(
                items.into_iter().map(serde_json::Value::from).collect(),
            ),
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (json_key(k), serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::Null => serde_json::Value::Null,
        }
    }
}

/// JSON object keys must be strings; non-text keys are rendered as JSON text.
fn json_key(key: Value) -> String {
    match key {
        Value::Text(s) => s,
        other => serde_json::Value::from(other).to_string(),
    }
}

/// Render a fixed-point decimal as text without going through f64.
fn decimal_string(raw: i128, scale: u8) -> String {
    if scale == 0 {
        return raw.to_string();
    }
    let digits = raw.unsigned_abs().to_string();
    let scale = scale as usize;
    let sign = if raw < 0 { "-" } else { "" };
    if digits.len() > scale {
        let split = digits.len() - scale;
        format!("{sign}{}.{}", &digits[..split], &digits[split..])
    } else {
        format!("{sign}0.{digits:0>scale$}")
    }
}
