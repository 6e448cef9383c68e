//! Domain patterns: the strings agents use to declare which tools they may call.

use super::entities::TOOL_NAME_SEPARATOR;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Trailing marker that turns a pattern into a wildcard (`event*`, `*`).
pub const WILDCARD_MARKER: char = '*';

/// A rule selecting tools by name.
///
/// The form is decided by the pattern's trailing character:
///
/// | Pattern | Form | Matches |
/// |---------|------|---------|
/// | `"sheets_*"` / `"*"` | [`Wildcard`](Self::Wildcard) | names starting with the text before `*` |
/// | `"event_"` | [`Prefix`](Self::Prefix) | names starting with `event_` |
/// | `"ask_user_input"` | [`Exact`](Self::Exact) | that name only |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainPattern {
    /// Marker already stripped
    Wildcard(String),
    /// Includes the trailing separator
    Prefix(String),
    Exact(String),
}

impl DomainPattern {
    pub fn parse(pattern: &str) -> Self {
        if let Some(stem) = pattern.strip_suffix(WILDCARD_MARKER) {
            DomainPattern::Wildcard(stem.to_string())
        } else if pattern.ends_with(TOOL_NAME_SEPARATOR) {
            DomainPattern::Prefix(pattern.to_string())
        } else {
            DomainPattern::Exact(pattern.to_string())
        }
    }

    /// Pattern matching every tool.
    pub fn all() -> Self {
        DomainPattern::Wildcard(String::new())
    }

    pub fn matches(&self, tool_name: &str) -> bool {
        match self {
            DomainPattern::Wildcard(stem) => tool_name.starts_with(stem.as_str()),
            DomainPattern::Prefix(prefix) => tool_name.starts_with(prefix.as_str()),
            DomainPattern::Exact(name) => tool_name == name,
        }
    }

    /// Parse a list of raw pattern strings, preserving order.
    pub fn parse_all<I, S>(patterns: I) -> Vec<DomainPattern>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .map(|p| DomainPattern::parse(p.as_ref()))
            .collect()
    }
}

impl fmt::Display for DomainPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainPattern::Wildcard(stem) => write!(f, "{}{}", stem, WILDCARD_MARKER),
            DomainPattern::Prefix(prefix) => f.write_str(prefix),
            DomainPattern::Exact(name) => f.write_str(name),
        }
    }
}

impl FromStr for DomainPattern {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DomainPattern::parse(s))
    }
}

impl Serialize for DomainPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DomainPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(DomainPattern::parse(&raw))
    }
}
