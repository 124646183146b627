//! Locale fallback resolution.
//!
//! Computes the effective per-locale view of an entity by merging a
//! locale's override bundle over the canonical fields. The merge is
//! per-field: a locale may override `title` while inheriting `slug`,
//! `excerpt`, and `body`. The SEO sub-bundle resolves recursively with
//! the same rule. `body` resolves as a whole unit, never per block.
//!
//! Resolution is pure and performs no I/O; it is safe to call once per
//! request. An unknown locale resolves as the configured default locale.

use crate::config::SiteConfig;
use crate::content::{
    ContentBlock, ContentEntity, LocaleCode, OverrideBundle, SeoBundle, renderable,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// Effective View
// ============================================================================

/// The fully resolved, locale-specific rendering of an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveView {
    /// Entity id the view was derived from.
    pub id: Uuid,

    /// The locale this view was resolved for (after default fallback).
    pub locale: LocaleCode,

    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub hero_image: Option<String>,
    pub body: Vec<ContentBlock>,
    pub seo: SeoBundle,

    /// Public path: `/<locale>/<prefix>/<slug>`.
    pub path: String,

    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl EffectiveView {
    /// Body blocks filtered down to renderable ones.
    pub fn renderable_body(&self) -> impl Iterator<Item = &ContentBlock> {
        renderable(&self.body)
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Pure reader producing effective views from entities.
///
/// Holds only a reference to the loaded configuration; safe to share and
/// call with unlimited concurrency.
#[derive(Debug, Clone, Copy)]
pub struct LocaleResolver<'a> {
    config: &'a SiteConfig,
}

impl<'a> LocaleResolver<'a> {
    pub const fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Resolve the effective view of `entity` for `requested`.
    ///
    /// Unsupported locale codes resolve as the configured default locale;
    /// this never fails.
    pub fn resolve(&self, entity: &ContentEntity, requested: &LocaleCode) -> EffectiveView {
        let locale = self.config.locales.resolve_requested(requested).clone();
        let canonical = &entity.canonical;
        let bundle = entity.translation(&locale);

        let slug = pick(bundle.and_then(|b| b.slug.as_deref()), &canonical.slug);
        let path = format!(
            "/{locale}/{}/{slug}",
            self.config.content.path_prefix
        );

        EffectiveView {
            id: entity.id,
            title: pick(bundle.and_then(|b| b.title.as_deref()), &canonical.title),
            excerpt: pick_opt(
                bundle.and_then(|b| b.excerpt.as_deref()),
                canonical.excerpt.as_deref(),
            ),
            hero_image: pick_opt(
                bundle.and_then(|b| b.hero_image.as_deref()),
                canonical.hero_image.as_deref(),
            ),
            body: resolve_body(bundle, &canonical.body),
            seo: resolve_seo(bundle, &canonical.seo),
            slug,
            path,
            locale,
            published_at: entity.published_at,
            updated_at: entity.updated_at,
        }
    }

    /// The effective slug of `entity` in `locale`, without building the
    /// full view. Used by the store's per-locale uniqueness checks.
    pub fn effective_slug(&self, entity: &ContentEntity, locale: &LocaleCode) -> String {
        let bundle = entity.translation(locale);
        pick(bundle.and_then(|b| b.slug.as_deref()), &entity.canonical.slug)
    }
}

// ============================================================================
// Fallback Helpers
// ============================================================================

/// Override value if present and non-empty, otherwise the canonical one.
fn pick(override_value: Option<&str>, canonical: &str) -> String {
    match override_value {
        Some(v) if !v.trim().is_empty() => v.to_owned(),
        _ => canonical.to_owned(),
    }
}

/// Same rule for fields that are optional on both sides.
fn pick_opt(override_value: Option<&str>, canonical: Option<&str>) -> Option<String> {
    match override_value {
        Some(v) if !v.trim().is_empty() => Some(v.to_owned()),
        _ => canonical
            .filter(|c| !c.trim().is_empty())
            .map(str::to_owned),
    }
}

/// An override replaces the entire block sequence when present and
/// non-empty.
fn resolve_body(bundle: Option<&OverrideBundle>, canonical: &[ContentBlock]) -> Vec<ContentBlock> {
    match bundle.and_then(|b| b.body.as_ref()) {
        Some(body) if !body.is_empty() => body.clone(),
        _ => canonical.to_vec(),
    }
}

/// Per-field recursive fallback for the SEO bundle.
fn resolve_seo(bundle: Option<&OverrideBundle>, canonical: &SeoBundle) -> SeoBundle {
    let seo = bundle.map(|b| &b.seo);

    SeoBundle {
        meta_title: pick_opt(
            seo.and_then(|s| s.meta_title.as_deref()),
            canonical.meta_title.as_deref(),
        ),
        meta_description: pick_opt(
            seo.and_then(|s| s.meta_description.as_deref()),
            canonical.meta_description.as_deref(),
        ),
        keywords: match seo.and_then(|s| s.keywords.as_ref()) {
            Some(keywords) if !keywords.is_empty() => keywords.clone(),
            _ => canonical.keywords.clone(),
        },
        social_title: pick_opt(
            seo.and_then(|s| s.social_title.as_deref()),
            canonical.social_title.as_deref(),
        ),
        social_description: pick_opt(
            seo.and_then(|s| s.social_description.as_deref()),
            canonical.social_description.as_deref(),
        ),
        social_image: pick_opt(
            seo.and_then(|s| s.social_image.as_deref()),
            canonical.social_image.as_deref(),
        ),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlockKind, CanonicalFields, Status};
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.locales.supported = vec![LocaleCode::new("en"), LocaleCode::new("bg")];
        config.locales.default = LocaleCode::new("en");
        config
    }

    fn paragraph(id: &str, text: &str) -> ContentBlock {
        ContentBlock {
            id: id.into(),
            kind: BlockKind::Paragraph {
                content: text.into(),
            },
        }
    }

    fn entity() -> ContentEntity {
        ContentEntity {
            id: Uuid::new_v4(),
            canonical: CanonicalFields {
                title: "Default Title".into(),
                slug: "default-title".into(),
                excerpt: Some("Canonical excerpt".into()),
                hero_image: None,
                body: vec![paragraph("b1", "canonical body")],
                tags: vec![],
                seo: SeoBundle {
                    meta_title: Some("Canonical Meta".into()),
                    keywords: vec!["one".into(), "two".into()],
                    ..Default::default()
                },
            },
            translations: BTreeMap::new(),
            status: Status::Published,
            published_at: Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_no_translation_uses_canonical() {
        let config = config();
        let resolver = LocaleResolver::new(&config);
        let view = resolver.resolve(&entity(), &LocaleCode::new("bg"));

        assert_eq!(view.title, "Default Title");
        assert_eq!(view.slug, "default-title");
        assert_eq!(view.locale, LocaleCode::new("bg"));
    }

    #[test]
    fn test_per_field_override() {
        let config = config();
        let resolver = LocaleResolver::new(&config);
        let mut e = entity();
        e.translations.insert(
            LocaleCode::new("bg"),
            OverrideBundle {
                title: Some("Заглавие".into()),
                ..Default::default()
            },
        );

        let view = resolver.resolve(&e, &LocaleCode::new("bg"));
        // title overridden, everything else inherited
        assert_eq!(view.title, "Заглавие");
        assert_eq!(view.slug, "default-title");
        assert_eq!(view.excerpt.as_deref(), Some("Canonical excerpt"));
    }

    #[test]
    fn test_empty_override_falls_back() {
        let config = config();
        let resolver = LocaleResolver::new(&config);
        let mut e = entity();
        e.translations.insert(
            LocaleCode::new("bg"),
            OverrideBundle {
                title: Some("".into()),
                ..Default::default()
            },
        );

        let view = resolver.resolve(&e, &LocaleCode::new("bg"));
        assert_eq!(view.title, "Default Title");
    }

    #[test]
    fn test_unknown_locale_resolves_as_default() {
        let config = config();
        let resolver = LocaleResolver::new(&config);
        let view = resolver.resolve(&entity(), &LocaleCode::new("fr"));

        assert_eq!(view.locale, LocaleCode::new("en"));
        assert!(view.path.starts_with("/en/"));
    }

    #[test]
    fn test_body_replaced_as_whole_unit() {
        let config = config();
        let resolver = LocaleResolver::new(&config);
        let mut e = entity();
        e.translations.insert(
            LocaleCode::new("bg"),
            OverrideBundle {
                body: Some(vec![
                    paragraph("t1", "преведен текст"),
                    paragraph("t2", "втори блок"),
                ]),
                ..Default::default()
            },
        );

        let view = resolver.resolve(&e, &LocaleCode::new("bg"));
        assert_eq!(view.body.len(), 2);
        assert_eq!(view.body[0].content(), "преведен текст");
    }

    #[test]
    fn test_empty_body_override_inherits_canonical() {
        let config = config();
        let resolver = LocaleResolver::new(&config);
        let mut e = entity();
        e.translations.insert(
            LocaleCode::new("bg"),
            OverrideBundle {
                body: Some(vec![]),
                ..Default::default()
            },
        );

        let view = resolver.resolve(&e, &LocaleCode::new("bg"));
        assert_eq!(view.body.len(), 1);
        assert_eq!(view.body[0].content(), "canonical body");
    }

    #[test]
    fn test_seo_resolves_per_field() {
        let config = config();
        let resolver = LocaleResolver::new(&config);
        let mut e = entity();
        e.translations.insert(
            LocaleCode::new("bg"),
            OverrideBundle {
                seo: crate::content::SeoOverride {
                    meta_description: Some("Описание".into()),
                    ..Default::default()
                },
                ..Default::default()
            },
        );

        let view = resolver.resolve(&e, &LocaleCode::new("bg"));
        // overridden field
        assert_eq!(view.seo.meta_description.as_deref(), Some("Описание"));
        // inherited fields
        assert_eq!(view.seo.meta_title.as_deref(), Some("Canonical Meta"));
        assert_eq!(view.seo.keywords, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_path_convention() {
        let config = config();
        let resolver = LocaleResolver::new(&config);
        let view = resolver.resolve(&entity(), &LocaleCode::new("bg"));
        assert_eq!(view.path, "/bg/post/default-title");
    }

    #[test]
    fn test_effective_slug_with_override() {
        let config = config();
        let resolver = LocaleResolver::new(&config);
        let mut e = entity();
        e.translations.insert(
            LocaleCode::new("bg"),
            OverrideBundle {
                slug: Some("zaglavie".into()),
                ..Default::default()
            },
        );

        assert_eq!(resolver.effective_slug(&e, &LocaleCode::new("bg")), "zaglavie");
        assert_eq!(resolver.effective_slug(&e, &LocaleCode::new("en")), "default-title");
    }

    #[test]
    fn test_renderable_body_filters() {
        let config = config();
        let resolver = LocaleResolver::new(&config);
        let mut e = entity();
        e.canonical.body.push(paragraph("b2", "   "));

        let view = resolver.resolve(&e, &LocaleCode::new("en"));
        assert_eq!(view.body.len(), 2);
        assert_eq!(view.renderable_body().count(), 1);
    }
}
