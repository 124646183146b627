//! Sitemap projection.
//!
//! Walks every published entity across every supported locale and emits
//! one `(locale, path, lastModified)` entry per pair, using the locale
//! resolver to compute each localized path. Also renders the standard
//! sitemap.xml format:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/en/post/hello-world</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```
//!
//! # Resilience
//!
//! A broken store must never take down page generation: when the source
//! fails, the projection degrades to one site-root entry per supported
//! locale instead of erroring.

use crate::config::SiteConfig;
use crate::content::{LocaleCode, LocaleResolver};
use crate::log;
use crate::store::ContentSource;
use chrono::{DateTime, Utc};

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Public API
// ============================================================================

/// One sitemap entry: a localized public path and its last-modified
/// instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub locale: LocaleCode,
    pub path: String,
    pub lastmod: DateTime<Utc>,
}

/// Render the sitemap XML if enabled in config.
///
/// Returns `None` when `[sitemap] enable = false`.
pub fn build_sitemap(config: &SiteConfig, source: &dyn ContentSource) -> Option<String> {
    if !config.sitemap.enable {
        return None;
    }
    let projector = SitemapProjector::new(config);
    let entries = projector.project(source);
    Some(projector.into_xml(&entries))
}

// ============================================================================
// Projector
// ============================================================================

/// Pure reader projecting published entities into sitemap entries.
///
/// One full pass per invocation; no cursor state is kept between calls.
#[derive(Debug, Clone, Copy)]
pub struct SitemapProjector<'a> {
    config: &'a SiteConfig,
}

impl<'a> SitemapProjector<'a> {
    pub const fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Project every published entity across every supported locale.
    ///
    /// Never fails: a store error degrades to [`Self::fallback`].
    pub fn project(&self, source: &dyn ContentSource) -> Vec<SitemapEntry> {
        let entities = match source.published() {
            Ok(entities) => entities,
            Err(err) => {
                log!("sitemap"; "store failed ({err}), emitting fallback");
                return self.fallback();
            }
        };

        let resolver = LocaleResolver::new(self.config);
        let mut entries =
            Vec::with_capacity(entities.len() * self.config.locales.supported.len());

        for entity in &entities {
            for locale in &self.config.locales.supported {
                let view = resolver.resolve(entity, locale);
                entries.push(SitemapEntry {
                    locale: locale.clone(),
                    path: view.path,
                    lastmod: entity.last_modified(),
                });
            }
        }

        log!("sitemap"; "{} entries across {} locales", entries.len(), self.config.locales.supported.len());
        entries
    }

    /// Minimal degraded projection: one site-root entry per locale.
    fn fallback(&self) -> Vec<SitemapEntry> {
        let now = Utc::now();
        self.config
            .locales
            .supported
            .iter()
            .map(|locale| SitemapEntry {
                locale: locale.clone(),
                path: format!("/{locale}/"),
                lastmod: now,
            })
            .collect()
    }

    /// Render entries as sitemap XML with absolute URLs.
    pub fn into_xml(&self, entries: &[SitemapEntry]) -> String {
        let base = self.config.base.url_trimmed();
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in entries {
            let loc = format!("{base}{}", entry.path);
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&loc)));
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                entry.lastmod.format("%Y-%m-%d")
            ));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
