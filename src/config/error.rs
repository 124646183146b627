//! Configuration error types.

use crate::content::LocaleCode;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("[locales] supported list must not be empty")]
    EmptySupportedList,

    #[error("[locales] supported contains an empty code")]
    EmptyLocaleCode,

    #[error("[locales] supported contains duplicate code `{0}`")]
    DuplicateLocale(LocaleCode),

    #[error("[locales] default `{0}` is not in the supported list")]
    DefaultLocaleNotSupported(LocaleCode),

    #[error("[content] max_title_len must be at least 1")]
    InvalidMaxTitleLen,

    #[error("[content] path_prefix `{0}` must be a single path segment")]
    PathPrefixNotSegment(String),
}
