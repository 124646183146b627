//! RSS feed projection.
//!
//! Builds a per-locale RSS channel from published entities, resolving
//! each one through the locale fallback so titles, excerpts, and slugs
//! come out in the requested language.
//!
//! Shares the sitemap projector's resilience contract: a failing store
//! yields a valid empty channel, never an error, so feed generation can
//! never take down a build.

use crate::config::SiteConfig;
use crate::content::{EffectiveView, LocaleCode, LocaleResolver};
use crate::log;
use crate::store::ContentSource;
use anyhow::{Result, anyhow};
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::sync::LazyLock;

// ============================================================================
// Public API
// ============================================================================

/// Build the RSS feed for a locale if enabled in config.
///
/// Returns `Ok(None)` when `[feed] enable = false`.
pub fn build_feed(
    config: &SiteConfig,
    source: &dyn ContentSource,
    locale: &LocaleCode,
) -> Result<Option<String>> {
    if !config.feed.enable {
        return Ok(None);
    }
    Feed::build(config, source, locale).into_xml().map(Some)
}

// ============================================================================
// Feed Implementation
// ============================================================================

/// RSS feed builder for one locale.
struct Feed<'a> {
    config: &'a SiteConfig,
    locale: LocaleCode,
    views: Vec<EffectiveView>,
}

impl<'a> Feed<'a> {
    /// Collect and resolve published entities for the locale.
    ///
    /// A failing store degrades to an empty item list.
    fn build(config: &'a SiteConfig, source: &dyn ContentSource, locale: &LocaleCode) -> Self {
        let locale = config.locales.resolve_requested(locale).clone();

        let entities = match source.published() {
            Ok(entities) => entities,
            Err(err) => {
                log!("feed"; "store failed ({err}), emitting empty channel");
                Vec::new()
            }
        };

        let resolver = LocaleResolver::new(config);
        let mut views: Vec<EffectiveView> = entities
            .iter()
            .map(|e| resolver.resolve(e, &locale))
            .collect();
        // Newest first; published entities always carry a publish date
        views.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        Self {
            config,
            locale,
            views,
        }
    }

    /// Generate the RSS XML string.
    fn into_xml(self) -> Result<String> {
        let items: Vec<_> = self
            .views
            .iter()
            .filter_map(|view| view_to_feed_item(view, self.config))
            .collect();

        let channel = ChannelBuilder::default()
            .title(&self.config.base.title)
            .link(self.config.base.url_trimmed().to_string())
            .description(&self.config.base.description)
            .language(Some(self.locale.to_string()))
            .generator("pressroom".to_string())
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("feed validation failed: {e}"))?;
        Ok(channel.to_string())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert an effective view to a feed item.
/// Returns None when the publish date is missing.
fn view_to_feed_item(view: &EffectiveView, config: &SiteConfig) -> Option<rss::Item> {
    let pub_date = view.published_at?.to_rfc2822();
    let link = format!("{}{}", config.base.url_trimmed(), view.path);

    Some(
        ItemBuilder::default()
            .title(view.title.clone())
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .description(view.excerpt.clone())
            .pub_date(pub_date)
            .author(normalize_feed_author(config))
            .build(),
    )
}

/// Normalize the site author to RSS format: "email@example.com (Name)"
///
/// Uses the configured author as-is if already in valid format,
/// otherwise combines the configured email and author name.
fn normalize_feed_author(config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$")
            .expect("author regex is valid")
    });

    let author = &config.base.author;
    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.clone());
    }

    Some(format!("{} ({})", config.base.email, author))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentEntity, OverrideBundle};
    use crate::error::PublishError;
    use crate::store::{ContentStore, EntityPatch, NewPost};

    struct BrokenSource;

    impl ContentSource for BrokenSource {
        fn published(&self) -> crate::error::Result<Vec<ContentEntity>> {
            Err(PublishError::StoreUnavailable("timeout".into()))
        }
    }

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Acme Blog".into();
        config.base.description = "Acme's engineering blog".into();
        config.base.url = "https://acme.example".into();
        config.base.author = "Alice".into();
        config.base.email = "alice@acme.example".into();
        config.locales.supported = vec![LocaleCode::new("en"), LocaleCode::new("bg")];
        config.locales.default = LocaleCode::new("en");
        config
    }

    fn store_with_post(config: &SiteConfig) -> ContentStore {
        let store = ContentStore::new();
        let entity = store
            .create(
                NewPost {
                    title: "Hello, World!".into(),
                    excerpt: Some("An introduction".into()),
                    ..Default::default()
                },
                config,
            )
            .unwrap();
        store
            .update(
                entity.id,
                EntityPatch::Translation(
                    LocaleCode::new("bg"),
                    OverrideBundle {
                        title: Some("Здравей, свят!".into()),
                        ..Default::default()
                    },
                ),
                config,
            )
            .unwrap();
        store.publish(entity.id).unwrap();
        store
    }

    #[test]
    fn test_feed_contains_resolved_items() {
        let config = config();
        let store = store_with_post(&config);

        let xml = build_feed(&config, &store, &LocaleCode::new("en"))
            .unwrap()
            .unwrap();
        assert!(xml.contains("<title>Acme Blog</title>"));
        assert!(xml.contains("Hello, World!"));
        assert!(xml.contains("https://acme.example/en/post/hello-world"));
        assert!(xml.contains("An introduction"));
    }

    #[test]
    fn test_feed_localizes_titles() {
        let config = config();
        let store = store_with_post(&config);

        let xml = build_feed(&config, &store, &LocaleCode::new("bg"))
            .unwrap()
            .unwrap();
        assert!(xml.contains("Здравей, свят!"));
        assert!(xml.contains("/bg/post/hello-world"));
        assert!(xml.contains("<language>bg</language>"));
    }

    #[test]
    fn test_feed_disabled_returns_none() {
        let mut config = config();
        config.feed.enable = false;
        let store = store_with_post(&config);

        let result = build_feed(&config, &store, &LocaleCode::new("en")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_broken_store_yields_valid_empty_channel() {
        let config = config();
        let xml = build_feed(&config, &BrokenSource, &LocaleCode::new("en"))
            .unwrap()
            .unwrap();
        assert!(xml.contains("<title>Acme Blog</title>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_normalize_feed_author_combines() {
        let config = config();
        assert_eq!(
            normalize_feed_author(&config),
            Some("alice@acme.example (Alice)".to_string())
        );
    }

    #[test]
    fn test_normalize_feed_author_passthrough_when_valid() {
        let mut config = config();
        config.base.author = "alice@acme.example (Alice)".into();
        assert_eq!(
            normalize_feed_author(&config),
            Some("alice@acme.example (Alice)".to_string())
        );
    }

    #[test]
    fn test_feed_pub_date_is_rfc2822() {
        let config = config();
        let store = store_with_post(&config);

        let xml = build_feed(&config, &store, &LocaleCode::new("en"))
            .unwrap()
            .unwrap();
        assert!(xml.contains("<pubDate>"));
        // RFC 2822 dates carry a +0000 offset
        assert!(xml.contains("+0000"));
    }
}
