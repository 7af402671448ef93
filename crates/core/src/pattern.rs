//! Glob pattern lists used by the whitelist and blacklist.
//!
//! A pattern containing `*` is translated into an anchored regex where every
//! `*` matches any run of characters. Anything else must equal the item code
//! byte for byte. Lists are persisted as a single comma-separated string.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Wildcard character recognised in patterns.
pub const WILDCARD: char = '*';

/// Upper bound on the compiled size of one wildcard pattern, in bytes.
pub const PATTERN_SIZE_LIMIT: usize = 256 * 1024;

/// Translate a wildcard pattern into an anchored regex source.
pub fn wildcard_to_regex(pattern: &str) -> String {
    format!("^{}$", regex::escape(pattern).replace(r"\*", ".*"))
}

#[derive(Debug, Clone)]
enum Matcher {
    Exact,
    Wildcard(Regex),
    /// The pattern failed to compile; it never matches.
    Invalid,
}

/// One entry of a pattern list.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    matcher: Matcher,
}

impl GlobPattern {
    /// Compile a pattern. Compilation failures are logged and yield a pattern
    /// that never matches.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let matcher = if source.contains(WILDCARD) {
            let compiled = RegexBuilder::new(&wildcard_to_regex(&source))
                .size_limit(PATTERN_SIZE_LIMIT)
                .build();
            match compiled {
                Ok(regex) => Matcher::Wildcard(regex),
                Err(err) => {
                    warn!("Invalid pattern '{}': {}", source, err);
                    Matcher::Invalid
                }
            }
        } else {
            Matcher::Exact
        };
        Self { source, matcher }
    }

    /// Pattern text as configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern uses wildcards.
    pub fn is_wildcard(&self) -> bool {
        !matches!(self.matcher, Matcher::Exact)
    }

    /// Whether the pattern failed to compile.
    pub fn is_invalid(&self) -> bool {
        matches!(self.matcher, Matcher::Invalid)
    }

    /// Test a full item code (`namespace:path`) against this pattern.
    pub fn matches(&self, code: &str) -> bool {
        match &self.matcher {
            Matcher::Exact => self.source == code,
            Matcher::Wildcard(regex) => regex.is_match(code),
            Matcher::Invalid => false,
        }
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for GlobPattern {}

/// Ordered list of trimmed, non-empty patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PatternList {
    patterns: Vec<GlobPattern>,
}

impl PatternList {
    /// Parse a comma-separated list. Entries are trimmed and empty entries
    /// dropped; order is preserved.
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect()
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the list has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate patterns in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &GlobPattern> {
        self.patterns.iter()
    }

    /// Pattern sources in configured order.
    pub fn sources(&self) -> Vec<&str> {
        self.patterns.iter().map(GlobPattern::as_str).collect()
    }

    /// First pattern matching `code`, if any.
    pub fn first_match(&self, code: &str) -> Option<&GlobPattern> {
        self.patterns.iter().find(|pattern| pattern.matches(code))
    }

    /// Whether any pattern matches `code`.
    pub fn matches_any(&self, code: &str) -> bool {
        self.first_match(code).is_some()
    }
}

impl<S: Into<String>> FromIterator<S> for PatternList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().map(GlobPattern::new).collect(),
        }
    }
}

impl fmt::Display for PatternList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sources().join(","))
    }
}

impl From<String> for PatternList {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for PatternList {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<PatternList> for String {
    fn from(value: PatternList) -> Self {
        value.to_string()
    }
}
