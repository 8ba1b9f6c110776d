//! Dot-separated configuration paths
//!
//! A path such as `pagination.users.limit` addresses a value nested inside
//! the configuration tree. Empty segments are dropped, so `a..b` and `.a.b.`
//! both resolve to `a.b`.

use crate::types::{ConfigError, Result};
use std::fmt;

/// A validated, non-empty list of path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath {
    segments: Vec<String>,
}

impl ConfigPath {
    /// Parse a dotted string into a path.
    ///
    /// Fails with [`ConfigError::InvalidPath`] when the input is empty or
    /// contains only separators.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(ConfigError::InvalidPath(
                "must be a non-empty string".to_string(),
            ));
        }

        let segments: Vec<String> = input
            .split('.')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            return Err(ConfigError::InvalidPath(format!(
                "'{}' cannot be empty or contain only dots",
                input
            )));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Every segment except the terminal one.
    pub fn parents(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The terminal segment.
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// True if `self` equals `other` or lies underneath it.
    pub fn starts_with(&self, other: &ConfigPath) -> bool {
        self.segments.len() >= other.segments.len()
            && self.segments[..other.segments.len()] == other.segments[..]
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl std::str::FromStr for ConfigPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let path = ConfigPath::parse("pagination.users.limit").unwrap();
        assert_eq!(path.segments(), ["pagination", "users", "limit"]);
        assert_eq!(path.parents(), ["pagination", "users"]);
        assert_eq!(path.leaf(), "limit");
    }

    #[test]
    fn test_parse_single_segment() {
        let path = ConfigPath::parse("theme").unwrap();
        assert!(path.parents().is_empty());
        assert_eq!(path.leaf(), "theme");
    }

    #[test]
    fn test_empty_segments_dropped() {
        let path = ConfigPath::parse(".a..b.").unwrap();
        assert_eq!(path.to_string(), "a.b");
    }

    #[test]
    fn test_malformed_paths_rejected() {
        for input in ["", ".", ".."] {
            let result = ConfigPath::parse(input);
            assert!(
                matches!(result, Err(ConfigError::InvalidPath(_))),
                "expected InvalidPath for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_segments_are_not_trimmed() {
        let path: ConfigPath = " a . b ".parse().unwrap();
        assert_eq!(path.segments(), [" a ", " b "]);
    }

    #[test]
    fn test_starts_with() {
        let parent = ConfigPath::parse("a.b").unwrap();
        assert!(ConfigPath::parse("a.b.c").unwrap().starts_with(&parent));
        assert!(ConfigPath::parse("a.b").unwrap().starts_with(&parent));
        assert!(!ConfigPath::parse("a.bc").unwrap().starts_with(&parent));
        assert!(!ConfigPath::parse("a").unwrap().starts_with(&parent));
    }
}
