use recast_api::error::ConvertError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("unknown handler: {0}")]
    UnknownHandler(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Add context to the error.
    ///
    /// For `Convert`, context is added to the inner `ConvertError`.
    /// For other variants, context is prepended to the message.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Convert(e) => EngineError::Convert(e.with_context(ctx)),
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
            EngineError::UnknownHandler(msg) => {
                EngineError::UnknownHandler(format!("{ctx}: {msg}"))
            }
            other => other,
        }
    }
}
