//! `[locales]` section configuration.
//!
//! The static locale list the resolver and projectors operate over:
//! an ordered set of supported locale codes plus one designated default.
//! Loaded once at startup and passed by reference; never global state.

use super::defaults;
use crate::content::LocaleCode;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[locales]` section in pressroom.toml.
///
/// # Example
/// ```toml
/// [locales]
/// supported = ["en", "bg", "de"]
/// default = "en"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct LocaleConfig {
    /// Ordered list of supported locale codes.
    #[serde(default = "defaults::locales::supported")]
    #[educe(Default = defaults::locales::supported())]
    pub supported: Vec<LocaleCode>,

    /// Designated default locale, the fallback for unknown codes.
    #[serde(default = "defaults::locales::default")]
    #[educe(Default = defaults::locales::default())]
    pub default: LocaleCode,
}

impl LocaleConfig {
    /// True when `locale` is one of the supported codes.
    pub fn is_supported(&self, locale: &LocaleCode) -> bool {
        self.supported.contains(locale)
    }

    /// Resolve a requested locale to a supported one.
    ///
    /// Unknown or unsupported codes fall back to the default locale.
    pub fn resolve_requested<'a>(&'a self, requested: &'a LocaleCode) -> &'a LocaleCode {
        if self.is_supported(requested) {
            requested
        } else {
            &self.default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_locales_defaults() {
        let config = r#"
            [base]
            title = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.locales.supported, vec![LocaleCode::new("en")]);
        assert_eq!(config.locales.default, LocaleCode::new("en"));
    }

    #[test]
    fn test_locales_full() {
        let config = r#"
            [base]
            title = "Test"

            [locales]
            supported = ["en", "BG", "de"]
            default = "bg"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        // Codes normalize to lowercase on load
        assert!(config.locales.is_supported(&LocaleCode::new("bg")));
        assert_eq!(config.locales.default, LocaleCode::new("bg"));
        assert_eq!(config.locales.supported.len(), 3);
    }

    #[test]
    fn test_resolve_requested_supported() {
        let locales = LocaleConfig {
            supported: vec![LocaleCode::new("en"), LocaleCode::new("bg")],
            default: LocaleCode::new("en"),
        };
        let bg = LocaleCode::new("bg");
        assert_eq!(locales.resolve_requested(&bg), &bg);
    }

    #[test]
    fn test_resolve_requested_unknown_falls_back() {
        let locales = LocaleConfig {
            supported: vec![LocaleCode::new("en"), LocaleCode::new("bg")],
            default: LocaleCode::new("en"),
        };
        let fr = LocaleCode::new("fr");
        assert_eq!(locales.resolve_requested(&fr), &LocaleCode::new("en"));
    }
}
