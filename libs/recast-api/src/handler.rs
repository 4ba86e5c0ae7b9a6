use std::fmt;

use crate::error::ConvertError;
use crate::kind::Kind;
use crate::value::Value;

/// Boxed conversion function. Errors pass through the pipeline unchanged.
pub type ConvertFn = Box<dyn Fn(Value) -> Result<Value, ConvertError> + Send + Sync>;

/// Applicability predicate. When set, it replaces the domain check entirely.
pub type HandlePredicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// A registered conversion step: one function plus the kinds it accepts.
///
/// Built once at registration time. The only mutation after that is
/// predicate customization through the reference `register` hands back.
pub struct Handler {
    function: ConvertFn,
    domain: Vec<Kind>,
    predicate: Option<HandlePredicate>,
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("domain", &self.domain)
            .field("custom_predicate", &self.predicate.is_some())
            .finish()
    }
}

impl Handler {
    pub fn new<F>(domain: Vec<Kind>, function: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ConvertError> + Send + Sync + 'static,
    {
        Self {
            function: Box::new(function),
            domain,
            predicate: None,
        }
    }

    pub fn domain(&self) -> &[Kind] {
        &self.domain
    }

    /// Replace the declared domain. Used by the engine to apply config
    /// overrides before registration.
    pub fn set_domain(&mut self, domain: Vec<Kind>) {
        self.domain = domain;
    }

    /// Replace the applicability check. The domain still drives the
    /// specificity comparison via [`Handler::matching_kind`].
    pub fn set_predicate<P>(&mut self, predicate: P)
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Box::new(predicate));
    }

    /// First declared kind the value falls under, in declaration order.
    pub fn matching_kind(&self, value: &Value) -> Option<Kind> {
        self.domain.iter().copied().find(|kind| kind.matches(value))
    }

    /// Whether this handler accepts the value. Default check: some domain
    /// kind matches.
    pub fn can_handle(&self, value: &Value) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(value),
            None => self.matching_kind(value).is_some(),
        }
    }

    /// Run the conversion function. Its errors are returned as-is.
    pub fn apply(&self, value: Value) -> Result<Value, ConvertError> {
        (self.function)(value)
    }

    /// A handler that can never match: empty domain and no predicate.
    pub fn is_dead(&self) -> bool {
        self.domain.is_empty() && self.predicate.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passthrough(value: Value) -> Result<Value, ConvertError> {
        Ok(value)
    }

    #[test]
    fn matching_kind_respects_declaration_order() {
        let handler = Handler::new(vec![Kind::Number, Kind::Int64], passthrough);
        // Int64 value matches both, the first declared kind wins.
        assert_eq!(handler.matching_kind(&Value::Int64(1)), Some(Kind::Number));
        assert_eq!(handler.matching_kind(&Value::Text("x".into())), None);
    }

    #[test]
    fn default_predicate_is_domain_check() {
        let handler = Handler::new(vec![Kind::Text], passthrough);
        assert!(handler.can_handle(&Value::Text("x".into())));
        assert!(!handler.can_handle(&Value::Int64(1)));
    }

    #[test]
    fn custom_predicate_replaces_domain_check() {
        let mut handler = Handler::new(vec![Kind::Text], passthrough);
        handler.set_predicate(|value| matches!(value, Value::Text(s) if !s.is_empty()));
        assert!(handler.can_handle(&Value::Text("x".into())));
        assert!(!handler.can_handle(&Value::Text(String::new())));
    }

    #[test]
    fn empty_domain_without_predicate_is_dead() {
        let handler = Handler::new(vec![], passthrough);
        assert!(handler.is_dead());
        assert!(!handler.can_handle(&Value::Null));

        let mut revived = Handler::new(vec![], passthrough);
        revived.set_predicate(|_| true);
        assert!(!revived.is_dead());
        assert!(revived.can_handle(&Value::Null));
    }

    #[test]
    fn apply_propagates_function_errors() {
        let handler = Handler::new(vec![Kind::Text], |_| {
            Err(ConvertError::handler("boom"))
        });
        let err = handler.apply(Value::Text("x".into())).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Handler);
        assert_eq!(err.message, "boom");
    }
}
