//! Locale code handling.
//!
//! Locale codes are short BCP 47-ish tags ("en", "bg", "zh-hans").
//! They are normalized to lowercase on construction so map lookups and
//! equality never depend on how a caller spelled the tag.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A normalized locale code.
///
/// Always lowercase and trimmed. Used as the key of an entity's
/// translation map and as the first path segment of public URLs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
#[serde(into = "String")]
pub struct LocaleCode(CompactString);

impl LocaleCode {
    /// Build a normalized locale code from any string-ish input.
    pub fn new(code: impl AsRef<str>) -> Self {
        let normalized: CompactString = code
            .as_ref()
            .trim()
            .chars()
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self(normalized)
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the code is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LocaleCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<LocaleCode> for String {
    fn from(code: LocaleCode) -> Self {
        code.0.into()
    }
}

impl From<&str> for LocaleCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl FromStr for LocaleCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
