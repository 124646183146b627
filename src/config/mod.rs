//! Site configuration management for `pressroom.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                         |
//! |--------------|-------------------------------------------------|
//! | `[base]`     | Site metadata (title, author, url)              |
//! | `[locales]`  | Supported locale codes + designated default     |
//! | `[content]`  | Content limits and public path prefix           |
//! | `[feed]`     | RSS feed projection toggle                      |
//! | `[sitemap]`  | Sitemap projection toggle                       |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Acme Engineering"
//! url = "https://acme.example"
//!
//! [locales]
//! supported = ["en", "bg"]
//! default = "en"
//!
//! [feed]
//! enable = true
//! ```
//!
//! The config is constructed once at startup and passed by reference to
//! the resolver, stores, and projectors.

mod base;
pub mod defaults;
mod error;
mod locales;

pub use base::BaseConfig;
pub use error::ConfigError;
pub use locales::LocaleConfig;

use anyhow::Result;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing pressroom.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Supported locales and the default
    #[serde(default)]
    pub locales: LocaleConfig,

    /// Content limits and path layout
    #[serde(default)]
    pub content: ContentConfig,

    /// Feed projection settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Sitemap projection settings
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

/// `[content]` section - limits and public path layout.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Maximum accepted title length in characters.
    #[serde(default = "defaults::content::max_title_len")]
    #[educe(Default = defaults::content::max_title_len())]
    pub max_title_len: usize,

    /// Path segment between the locale and the slug: `/<locale>/<prefix>/<slug>`.
    #[serde(default = "defaults::content::path_prefix")]
    #[educe(Default = defaults::content::path_prefix())]
    pub path_prefix: String,
}

/// `[feed]` section - RSS feed projection toggle.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Whether feed projection is enabled.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,
}

/// `[sitemap]` section - sitemap projection toggle.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    /// Whether sitemap projection is enabled.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Validate cross-field constraints after loading.
    pub fn validate(&self) -> Result<()> {
        if self.locales.supported.is_empty() {
            return Err(ConfigError::EmptySupportedList.into());
        }

        let mut seen = HashSet::new();
        for code in &self.locales.supported {
            if code.is_empty() {
                return Err(ConfigError::EmptyLocaleCode.into());
            }
            if !seen.insert(code) {
                return Err(ConfigError::DuplicateLocale(code.clone()).into());
            }
        }

        if !self.locales.is_supported(&self.locales.default) {
            return Err(
                ConfigError::DefaultLocaleNotSupported(self.locales.default.clone()).into(),
            );
        }

        if self.content.max_title_len == 0 {
            return Err(ConfigError::InvalidMaxTitleLen.into());
        }

        if self.content.path_prefix.contains('/') {
            return Err(ConfigError::PathPrefixNotSegment(self.content.path_prefix.clone()).into());
        }

        Ok(())
    }
}
