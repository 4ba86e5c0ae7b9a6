use std::fmt;

use crate::value::Value;

/// Closed set of value kinds, arranged in a fixed single-parent lattice:
///
/// ```text
/// Any
/// ├── Scalar
/// │   ├── Number
/// │   │   ├── Integer
/// │   │   │   ├── Int64
/// │   │   │   └── UInt64
/// │   │   ├── Float64
/// │   │   └── Decimal
/// │   ├── Bool
/// │   └── Timestamp
/// ├── Text
/// ├── Bytes
/// ├── Sequence
/// ├── Mapping
/// └── Null
/// ```
///
/// A handler registered for an inner kind (`Number`, `Scalar`, `Any`)
/// accepts every value whose leaf kind sits below it. "More specific"
/// means deeper in the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Any,
    Scalar,
    Number,
    Integer,
    Int64,
    UInt64,
    Float64,
    Decimal,
    Bool,
    Timestamp,
    Text,
    Bytes,
    Sequence,
    Mapping,
    Null,
}

impl Kind {
    /// Leaf kind of a value.
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::Int64(_) => Kind::Int64,
            Value::UInt64(_) => Kind::UInt64,
            Value::Float64(_) => Kind::Float64,
            Value::Bool(_) => Kind::Bool,
            Value::Decimal(_, _) => Kind::Decimal,
            Value::Timestamp(_, _) => Kind::Timestamp,
            Value::Text(_) => Kind::Text,
            Value::Bytes(_) => Kind::Bytes,
            Value::Array(_) => Kind::Sequence,
            Value::Map(_) => Kind::Mapping,
            Value::Null => Kind::Null,
        }
    }

    /// Parent edge in the lattice. `Any` is the root.
    pub fn parent(self) -> Option<Kind> {
        match self {
            Kind::Any => None,
            Kind::Scalar | Kind::Text | Kind::Bytes | Kind::Sequence | Kind::Mapping
            | Kind::Null => Some(Kind::Any),
            Kind::Number | Kind::Bool | Kind::Timestamp => Some(Kind::Scalar),
            Kind::Integer | Kind::Float64 | Kind::Decimal => Some(Kind::Number),
            Kind::Int64 | Kind::UInt64 => Some(Kind::Integer),
        }
    }

    /// Reflexive subtype check: walks the parent chain up to the root.
    pub fn is_subtype_of(self, other: Kind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    pub fn is_strict_subtype_of(self, other: Kind) -> bool {
        self != other && self.is_subtype_of(other)
    }

    /// Instance check: the value's leaf kind falls under this kind.
    pub fn matches(self, value: &Value) -> bool {
        Kind::of(value).is_subtype_of(self)
    }

    /// Stable name, used in error messages and accepted by the engine's
    /// config parser.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Any => "any",
            Kind::Scalar => "scalar",
            Kind::Number => "number",
            Kind::Integer => "integer",
            Kind::Int64 => "int64",
            Kind::UInt64 => "uint64",
            Kind::Float64 => "float64",
            Kind::Decimal => "decimal",
            Kind::Bool => "bool",
            Kind::Timestamp => "timestamp",
            Kind::Text => "text",
            Kind::Bytes => "bytes",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
            Kind::Null => "null",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
