//! `[base]` section configuration.
//!
//! Contains basic site information like title, author, url, etc.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in pressroom.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Acme Engineering"
/// description = "What we build and why"
/// author = "Alice"
/// url = "https://acme.example"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title used as the feed channel title.
    pub title: String,

    /// Author name for feed items when a post has none.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Author email for feed items.
    #[serde(default = "defaults::base::email")]
    #[educe(Default = defaults::base::email())]
    pub email: String,

    /// Site description for the feed channel.
    #[serde(default)]
    pub description: String,

    /// Base URL for absolute links in feed/sitemap, no trailing slash.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: String,
}

impl BaseConfig {
    /// Base URL with any trailing slash removed.
    pub fn url_trimmed(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}
