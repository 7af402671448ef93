//! Namespaced item codes.
//!
//! Codes are the host's string identifiers for block and item types (e.g.
//! `game:rawclay`). They are taken verbatim from live slots, so parsing never
//! rejects input: a code without a namespace lands in [`DEFAULT_NAMESPACE`]
//! and an empty path is kept as-is.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Default namespace used when a code omits an explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "game";

/// An item code of the form `namespace:path`.
///
/// Ordering is lexical by `(namespace, path)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ItemCode {
    namespace: String,
    path: String,
}

impl ItemCode {
    /// Build a code from its parts.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Parse a code.
    ///
    /// Accepts either:
    /// - `namespace:path`
    /// - `path` (uses [`DEFAULT_NAMESPACE`])
    pub fn parse(input: &str) -> Self {
        Self::parse_with_default_namespace(input, DEFAULT_NAMESPACE)
    }

    /// Parse a code using a caller-provided default namespace.
    pub fn parse_with_default_namespace(input: &str, default_namespace: &str) -> Self {
        let input = input.trim();
        match input.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(default_namespace, input),
        }
    }

    /// Code namespace (the mod domain).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Code path (everything after the first `:`).
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for ItemCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for ItemCode {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for ItemCode {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<ItemCode> for String {
    fn from(value: ItemCode) -> Self {
        value.to_string()
    }
}
