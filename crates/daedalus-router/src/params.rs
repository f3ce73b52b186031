//! Path parameter extraction and storage.
//!
//! This module provides storage for parameters extracted during path
//! matching, using a small-vector optimization to avoid heap allocations
//! for the common case of few parameters per route.

use smallvec::SmallVec;

/// Maximum number of parameters stored inline (stack allocated).
const INLINE_PARAMS: usize = 4;

/// Parameters extracted from a matched path.
///
/// Parameters are stored as ordered `(name, value)` pairs in pattern order.
/// An optional pattern segment that the request path did not supply is
/// still *bound*: its name appears with no value, which is how handlers
/// distinguish "parameter absent from the request" from "parameter the
/// route never declares".
///
/// # Example
///
/// ```rust
/// use daedalus_router::Params;
///
/// let mut params = Params::new();
/// params.push("name", "John");
/// params.push_absent("age");
///
/// assert_eq!(params.get("name"), Some("John"));
/// assert_eq!(params.get("age"), None);
/// assert!(params.contains("age"));
/// assert!(!params.contains("unknown"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    /// Storage for parameter (name, value) pairs
    inner: SmallVec<[(String, Option<String>); INLINE_PARAMS]>,
}

impl Params {
    /// Creates a new empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a captured parameter value.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), Some(value.into())));
    }

    /// Binds a parameter name with no value.
    ///
    /// Used for trailing optional segments the request path did not supply.
    pub fn push_absent(&mut self, name: impl Into<String>) {
        self.inner.push((name.into(), None));
    }

    /// Returns the captured value for a parameter, if one was captured.
    ///
    /// Returns `None` both for unknown names and for optional parameters
    /// bound without a value; use [`Params::contains`] to tell the two
    /// apart.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Returns true if the parameter name was bound, with or without a value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.iter().any(|(n, _)| n == name)
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over `(name, value)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, Option<&'a str>);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, Option<String>)>,
        fn(&'a (String, Option<String>)) -> (&'a str, Option<&'a str>),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }
}

impl FromIterator<(String, Option<String>)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_new() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
    }

    #[test]
    fn test_params_push_and_get() {
        let mut params = Params::new();
        params.push("id", "123");
        params.push("name", "alice");

        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.get("name"), Some("alice"));
        assert_eq!(params.get("unknown"), None);
    }

    #[test]
    fn test_params_absent_binding() {
        let mut params = Params::new();
        params.push("name", "John");
        params.push_absent("age");

        assert_eq!(params.get("age"), None);
        assert!(params.contains("age"));
        assert!(!params.contains("height"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_params_iter_preserves_order() {
        let mut params = Params::new();
        params.push("a", "1");
        params.push_absent("b");
        params.push("c", "3");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("a", Some("1")), ("b", None), ("c", Some("3"))]);
    }

    #[test]
    fn test_params_from_iterator() {
        let pairs = vec![
            ("a".to_string(), Some("1".to_string())),
            ("b".to_string(), None),
        ];

        let params: Params = pairs.into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some("1"));
        assert!(params.contains("b"));
    }

    #[test]
    fn test_params_many_params() {
        // More than the inline capacity
        let mut params = Params::new();
        for i in 0..10 {
            params.push(format!("key{i}"), format!("value{i}"));
        }

        assert_eq!(params.len(), 10);
        assert_eq!(params.get("key5"), Some("value5"));
    }
}
