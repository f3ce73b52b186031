//! Route pattern compilation and path matching.
//!
//! A [`PathPattern`] is the compiled form of a route pattern string. It is
//! produced once at registration time and matched against request paths on
//! every dispatch, so compilation does all validation up front and matching
//! allocates only for captured parameter values.

use thiserror::Error;

use crate::params::Params;

/// Errors raised while compiling a route pattern.
///
/// Pattern errors are registration-time failures: a router refuses to
/// start with a malformed route table rather than misroute requests later.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// An optional parameter is followed by a non-optional segment.
    ///
    /// Optional parameters must form a contiguous trailing run, otherwise
    /// matching would be ambiguous about which segment fills which slot.
    #[error("optional parameter '{{{parameter}?}}' must be trailing")]
    OptionalBeforeRequired {
        /// Name of the offending optional parameter.
        parameter: String,
    },

    /// The same parameter name appears more than once in one pattern.
    #[error("duplicate parameter name '{parameter}'")]
    DuplicateParameter {
        /// The repeated parameter name.
        parameter: String,
    },

    /// A parameter segment has no name (`{}` or `{?}`).
    #[error("parameter segment has an empty name")]
    EmptyParameterName,
}

/// A single compiled segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A literal segment, matched verbatim (e.g. `users`).
    Static(String),

    /// A required named parameter (e.g. `{id}`), consuming one segment.
    Param(String),

    /// An optional named parameter (e.g. `{age?}`), consuming one segment
    /// if the path supplies one.
    Optional(String),
}

impl PathSegment {
    /// Returns the parameter name if this segment binds one.
    #[must_use]
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::Static(_) => None,
            Self::Param(name) | Self::Optional(name) => Some(name),
        }
    }
}

/// A compiled route pattern.
///
/// Matching is positional: pattern segments are compared against the
/// request path segment by segment. Empty path segments are filtered on
/// both sides, so trailing slashes are normalized (`/users/` matches
/// `/users`) and `/user//` cannot smuggle an empty value into `{id}`.
///
/// # Example
///
/// ```rust
/// use daedalus_router::PathPattern;
///
/// let pattern = PathPattern::parse("user/{id}").unwrap();
///
/// let params = pattern.match_path("/user/42").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
///
/// assert!(pattern.match_path("/user").is_none());
/// assert!(pattern.match_path("/user/42/posts").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    /// The original pattern string, normalized with a leading slash.
    raw: String,
    /// Compiled segments in pattern order.
    segments: Vec<PathSegment>,
}

impl PathPattern {
    /// Compiles a pattern string.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if an optional parameter precedes a
    /// non-optional segment, a parameter name is repeated, or a parameter
    /// segment has an empty name.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        let mut seen_optional: Option<String> = None;

        for part in pattern.split('/').filter(|s| !s.is_empty()) {
            let segment = if let Some(inner) =
                part.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
            {
                if let Some(name) = inner.strip_suffix('?') {
                    if name.is_empty() {
                        return Err(PatternError::EmptyParameterName);
                    }
                    PathSegment::Optional(name.to_string())
                } else {
                    if inner.is_empty() {
                        return Err(PatternError::EmptyParameterName);
                    }
                    PathSegment::Param(inner.to_string())
                }
            } else {
                PathSegment::Static(part.to_string())
            };

            if let Some(optional) = &seen_optional {
                if !matches!(segment, PathSegment::Optional(_)) {
                    return Err(PatternError::OptionalBeforeRequired {
                        parameter: optional.clone(),
                    });
                }
            }

            if let Some(name) = segment.param_name() {
                let duplicate = segments
                    .iter()
                    .filter_map(PathSegment::param_name)
                    .any(|existing| existing == name);
                if duplicate {
                    return Err(PatternError::DuplicateParameter {
                        parameter: name.to_string(),
                    });
                }
            }

            if seen_optional.is_none() {
                if let PathSegment::Optional(name) = &segment {
                    seen_optional = Some(name.clone());
                }
            }
            segments.push(segment);
        }

        let raw = format!("/{}", pattern.trim_matches('/'));
        Ok(Self { raw, segments })
    }

    /// Returns the normalized pattern string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the compiled segments in pattern order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the number of segments that must be present in a path.
    #[must_use]
    pub fn required_len(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| !matches!(s, PathSegment::Optional(_)))
            .count()
    }

    /// Matches a request path against this pattern.
    ///
    /// Returns the extracted parameters on a match, with unsupplied
    /// trailing optionals bound absent; returns `None` otherwise.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if parts.len() > self.segments.len() || parts.len() < self.required_len() {
            return None;
        }

        let mut params = Params::new();
        for (i, segment) in self.segments.iter().enumerate() {
            match (segment, parts.get(i)) {
                (PathSegment::Static(expected), Some(actual)) => {
                    if expected != actual {
                        return None;
                    }
                }
                (PathSegment::Param(name), Some(actual)) => {
                    params.push(name.clone(), (*actual).to_string());
                }
                (PathSegment::Optional(name), Some(actual)) => {
                    params.push(name.clone(), (*actual).to_string());
                }
                (PathSegment::Optional(name), None) => {
                    params.push_absent(name.clone());
                }
                // required_len already rules these out; be explicit anyway
                (PathSegment::Static(_) | PathSegment::Param(_), None) => return None,
            }
        }

        Some(params)
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
