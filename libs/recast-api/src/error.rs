use std::fmt;

/// Error kind for conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No registered handler accepts the value.
    NoHandler,
    /// A conversion function failed.
    Handler,
    /// The step limit was exceeded before reaching the target range.
    Cycle,
    /// Invalid construction or configuration.
    Config,
}

/// Conversion error — the single error type of the value pipeline.
#[derive(Debug)]
pub struct ConvertError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ConvertError {
    pub fn no_handler(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::NoHandler, message: msg.into() }
    }

    pub fn handler(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Handler, message: msg.into() }
    }

    pub fn cycle(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Cycle, message: msg.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Config, message: msg.into() }
    }

    /// Add context to the error, preserving the original ErrorKind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ConvertError {}

// ---------------------------------------------------------------------------
// From impls: standard error types → ConvertError with correct ErrorKind
// ---------------------------------------------------------------------------

impl From<std::num::ParseIntError> for ConvertError {
    fn from(e: std::num::ParseIntError) -> Self {
        Self::handler(e.to_string())
    }
}

impl From<std::num::ParseFloatError> for ConvertError {
    fn from(e: std::num::ParseFloatError) -> Self {
        Self::handler(e.to_string())
    }
}

impl From<std::str::Utf8Error> for ConvertError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::handler(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ConvertError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::handler(e.to_string())
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(e: serde_json::Error) -> Self {
        Self::handler(e.to_string())
    }
}
