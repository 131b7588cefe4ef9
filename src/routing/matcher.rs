//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse path patterns such as `/:id/edit` into segments
//! - Match a request path and extract named parameters
//! - Compare patterns by shape (duplicate and shadow detection)
//!
//! # Design Decisions
//! - A parameter captures exactly one non-empty segment
//! - Trailing slashes are ignored on both patterns and paths
//! - Literal matching is case-sensitive
//! - No regex, matching is a single pass over the segments

use std::fmt;

use crate::routing::RouterError;

/// One segment of a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Literal(String),
    /// Captures any non-empty path segment under the given name.
    Param(String),
}

/// A parsed route path, e.g. `/:id/edit`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern. Patterns must start with `/`.
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        let invalid = |reason: &'static str| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(invalid("pattern must start with '/'"));
        };

        let rest = rest.trim_end_matches('/');
        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                if part.is_empty() {
                    return Err(invalid("empty path segment"));
                }
                match part.strip_prefix(':') {
                    Some("") => return Err(invalid("parameter name is empty")),
                    Some(name) => {
                        if segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(n) if n == name))
                        {
                            return Err(invalid("parameter name is used twice"));
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Literal(part.to_string())),
                }
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as it was written at registration.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match a request path, returning the captured parameters.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let rest = path.strip_prefix('/')?.trim_end_matches('/');

        let mut params = Params::default();
        // An empty remainder (the root path) yields no segments at all.
        let mut parts = rest.split_terminator('/');

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(expected) => {
                    if part != expected {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.push(name.clone(), part.to_string());
                }
            }
        }

        // Leftover segments mean the path is longer than the pattern.
        if parts.next().is_some() {
            return None;
        }

        Some(params)
    }

    /// True if both patterns match exactly the same set of paths.
    pub fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// True if every path matched by `other` is also matched by `self`.
    pub fn covers(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Param(_), _) => true,
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Literal(_), Segment::Param(_)) => false,
                })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Path parameters captured by a match, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, name: String, value: String) {
        self.entries.push((name, value));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let pattern = PathPattern::parse("/").unwrap();
        assert!(pattern.segments().is_empty());
        assert_eq!(pattern.as_str(), "/");
    }

    #[test]
    fn test_parse_segments() {
        let pattern = PathPattern::parse("/:id/edit").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Param("id".into()),
                Segment::Literal("edit".into())
            ]
        );
    }

    #[test]
    fn test_parse_rejects_bad_patterns() {
        assert!(PathPattern::parse("books").is_err());
        assert!(PathPattern::parse("/:").is_err());
        assert!(PathPattern::parse("/a//b").is_err());
        assert!(PathPattern::parse("/:id/:id").is_err());
    }

    #[test]
    fn test_root_matches_with_and_without_slash() {
        let pattern = PathPattern::parse("/").unwrap();
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("").is_none());
        assert!(pattern.matches("/42").is_none());
    }

    #[test]
    fn test_param_capture() {
        let pattern = PathPattern::parse("/:id").unwrap();
        let params = pattern.matches("/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.len(), 1);

        // Trailing slash is ignored
        assert_eq!(pattern.matches("/42/").unwrap().get("id"), Some("42"));
        assert!(pattern.matches("/42/edit").is_none());
        assert!(pattern.matches("/").is_none());
    }

    #[test]
    fn test_literal_is_case_sensitive() {
        let pattern = PathPattern::parse("/new").unwrap();
        assert!(pattern.matches("/new").is_some());
        assert!(pattern.matches("/NEW").is_none());
    }

    #[test]
    fn test_empty_segment_does_not_bind_param() {
        let pattern = PathPattern::parse("/:id/edit").unwrap();
        assert!(pattern.matches("//edit").is_none());
        assert_eq!(
            pattern.matches("/7/edit").unwrap().get("id"),
            Some("7")
        );
    }

    #[test]
    fn test_shape_and_cover() {
        let by_id = PathPattern::parse("/:id").unwrap();
        let by_key = PathPattern::parse("/:key").unwrap();
        let count = PathPattern::parse("/count").unwrap();

        assert!(by_id.same_shape(&by_key));
        assert!(!by_id.same_shape(&count));
        assert!(by_id.covers(&count));
        assert!(!count.covers(&by_id));
    }

    #[test]
    fn test_params_from_iter() {
        let params: Params = [("id", "1"), ("slug", "rust")].into_iter().collect();
        assert_eq!(params.get("slug"), Some("rust"));
        assert_eq!(params.iter().count(), 2);
    }
}
