use std::fmt;

use recast_api::error::ConvertError;
use recast_api::handler::Handler;
use recast_api::kind::Kind;
use recast_api::value::Value;

/// Fallback invoked when no handler accepts the current value.
pub type DefaultFn = Box<dyn Fn(Value) -> Result<Value, ConvertError> + Send + Sync>;

/// Drives a value through a chain of handlers until its kind falls within
/// the target range.
///
/// Handlers are kept in registration order. Order is the tie-break when two
/// matching handlers are equally specific: first registered wins.
pub struct Converter {
    range: Vec<Kind>,
    handlers: Vec<Handler>,
    default_handler: DefaultFn,
    step_limit: Option<usize>,
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("range", &self.range)
            .field("handlers", &self.handlers)
            .field("step_limit", &self.step_limit)
            .finish()
    }
}

impl Converter {
    /// Converter with a single target kind.
    pub fn new(target: Kind) -> Self {
        Self {
            range: vec![target],
            handlers: Vec::new(),
            default_handler: Box::new(default_no_handler),
            step_limit: None,
        }
    }

    /// Converter with an ordered set of target kinds. The range must not
    /// be empty.
    pub fn with_range(range: Vec<Kind>) -> Result<Self, ConvertError> {
        if range.is_empty() {
            return Err(ConvertError::config("converter range must not be empty"));
        }
        Ok(Self {
            range,
            handlers: Vec::new(),
            default_handler: Box::new(default_no_handler),
            step_limit: None,
        })
    }

    pub fn range(&self) -> &[Kind] {
        &self.range
    }

    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    /// Register a conversion function for the given domain.
    ///
    /// Returns the stored handler so the caller can attach a custom
    /// predicate.
    pub fn register<F>(&mut self, domain: Vec<Kind>, function: F) -> &mut Handler
    where
        F: Fn(Value) -> Result<Value, ConvertError> + Send + Sync + 'static,
    {
        self.register_handler(Handler::new(domain, function))
    }

    /// Register a pre-built handler, appending it to the chain.
    pub fn register_handler(&mut self, handler: Handler) -> &mut Handler {
        if handler.is_dead() {
            tracing::warn!(
                "registering handler with empty domain and no predicate, it will never match"
            );
        }
        self.handlers.push(handler);
        let last = self.handlers.len() - 1;
        &mut self.handlers[last]
    }

    /// Replace the no-match fallback. The default fails with a
    /// `NoHandler` error.
    pub fn set_default<F>(&mut self, function: F)
    where
        F: Fn(Value) -> Result<Value, ConvertError> + Send + Sync + 'static,
    {
        self.default_handler = Box::new(function);
    }

    /// Bound the conversion loop. A cyclic handler chain (A → B, B → A)
    /// otherwise spins forever; with a limit set, exceeding it fails with
    /// a `Cycle` error instead. Unbounded by default.
    pub fn set_step_limit(&mut self, limit: usize) {
        self.step_limit = Some(limit);
    }

    /// True iff the value's kind falls under one of the target kinds.
    /// First match wins.
    pub fn in_range(&self, value: &Value) -> bool {
        self.range.iter().any(|kind| kind.matches(value))
    }

    /// Pick the handler to apply next: a single left-to-right fold over the
    /// handlers whose `can_handle` holds.
    ///
    /// The first match seeds the running best; a later candidate replaces
    /// it only when both matched kinds are present and the candidate's is a
    /// strict subtype of the best's. Everything else (equal kinds,
    /// unrelated kinds, a predicate-only match with no matched kind) keeps
    /// the earlier registration. This is not a global most-specific
    /// ordering: with multi-kind domains, different registration orders can
    /// pick different winners.
    pub fn find_best_handler(&self, value: &Value) -> Option<&Handler> {
        let mut best: Option<(&Handler, Option<Kind>)> = None;
        for handler in &self.handlers {
            if !handler.can_handle(value) {
                continue;
            }
            let matched = handler.matching_kind(value);
            match best {
                None => best = Some((handler, matched)),
                Some((_, best_kind)) => {
                    if let (Some(candidate), Some(current)) = (matched, best_kind) {
                        if candidate.is_strict_subtype_of(current) {
                            best = Some((handler, matched));
                        }
                    }
                }
            }
        }
        best.map(|(handler, _)| handler)
    }

    /// Drive the value through the handler chain until it lands in the
    /// target range.
    ///
    /// A value already in range is returned untouched. When no handler
    /// accepts the current value, the default handler's result is returned
    /// as-is; the range is not re-checked. Handler errors propagate
    /// unchanged, fail-fast, no retries.
    pub fn convert(&self, mut value: Value) -> Result<Value, ConvertError> {
        let mut steps = 0usize;
        loop {
            if self.in_range(&value) {
                return Ok(value);
            }
            let Some(handler) = self.find_best_handler(&value) else {
                return (self.default_handler)(value);
            };
            if let Some(limit) = self.step_limit {
                if steps >= limit {
                    return Err(ConvertError::cycle(format!(
                        "conversion exceeded {limit} steps without reaching the target range"
                    )));
                }
            }
            let from = value.kind();
            value = handler.apply(value)?;
            steps += 1;
            tracing::debug!(step = steps, from = %from, to = %value.kind(), "applied handler");
        }
    }
}

fn default_no_handler(value: Value) -> Result<Value, ConvertError> {
    Err(ConvertError::no_handler(format!(
        "cannot convert value of type {}",
        value.kind()
    )))
}
