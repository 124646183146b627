//! Content publishing store.
//!
//! The persistence boundary for content entities: documents keyed by
//! stable id, each holding canonical fields, a map of locale override
//! bundles, and publication status/timestamps.
//!
//! # Atomicity
//!
//! Uses `RwLock` to allow:
//! - Multiple concurrent reads (per-request resolution, projections)
//! - Exclusive writes (editor mutations)
//!
//! Slug uniqueness is a check-then-act race under concurrent creation,
//! so the check and the insert run inside one write-lock critical
//! section. The same holds for every other mutation.
//!
//! # Visibility
//!
//! Public read paths (`get_by_slug`, `list_published`) only ever return
//! published entities; `get` exists for editorial tooling and returns
//! drafts too.

use crate::config::SiteConfig;
use crate::content::{
    CanonicalFields, ContentBlock, ContentEntity, EffectiveView, LocaleCode, LocaleResolver,
    OverrideBundle, SeoBundle, Status, generate_slug, is_valid_slug,
};
use crate::error::{PublishError, Result};
use crate::log;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// Inputs
// ============================================================================

/// Input for [`ContentStore::create`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPost {
    /// Required canonical title.
    pub title: String,

    /// Optional caller-supplied slug; derived from the title when absent.
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub excerpt: Option<String>,

    #[serde(default)]
    pub hero_image: Option<String>,

    #[serde(default)]
    pub body: Vec<ContentBlock>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub seo: SeoBundle,
}

/// A partial patch for [`ContentStore::update`], targeting either the
/// canonical fields or one locale's override bundle.
#[derive(Debug, Clone)]
pub enum EntityPatch {
    Canonical(CanonicalPatch),
    /// Merges the given bundle over the locale's existing overrides.
    /// Setting a field to an empty string returns it to inheritance.
    Translation(LocaleCode, OverrideBundle),
}

/// Field-wise canonical patch; `Some` replaces, `None` leaves untouched.
/// The slug never changes implicitly when the title does - public URLs
/// stay stable unless the editor patches `slug` explicitly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CanonicalPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub body: Option<Vec<ContentBlock>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub seo: Option<SeoBundle>,
}

/// Listing filter for [`ContentStore::list_published`].
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Locale to resolve results into; the default locale when `None`.
    pub locale: Option<LocaleCode>,
    /// Only entities carrying this tag.
    pub tag: Option<String>,
}

/// 1-based pagination window.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// One page of listing results.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching items across all pages.
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

// ============================================================================
// Source Seam
// ============================================================================

/// Read seam for projectors.
///
/// The sitemap/feed projectors consume published entities through this
/// trait so a failing backing store can be substituted in tests and the
/// projection's degraded path stays reachable.
pub trait ContentSource {
    /// All published entities, unordered.
    fn published(&self) -> Result<Vec<ContentEntity>>;
}

// ============================================================================
// Store
// ============================================================================

/// Thread-safe store owning all persisted content entities.
#[derive(Debug, Default)]
pub struct ContentStore {
    entities: RwLock<BTreeMap<Uuid, ContentEntity>>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new draft entity.
    ///
    /// Requires a non-empty canonical title; derives the slug from the
    /// title when none is supplied. Rejects with `Conflict` when the
    /// slug collides with any entity's effective slug in any supported
    /// locale.
    pub fn create(&self, new: NewPost, config: &SiteConfig) -> Result<ContentEntity> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(PublishError::validation("title", "must not be empty"));
        }
        if title.chars().count() > config.content.max_title_len {
            return Err(PublishError::validation(
                "title",
                format!("exceeds {} characters", config.content.max_title_len),
            ));
        }

        let slug = match new.slug {
            Some(slug) => {
                if !is_valid_slug(&slug) {
                    return Err(PublishError::validation(
                        "slug",
                        format!("`{slug}` is not in slug form"),
                    ));
                }
                slug
            }
            None => generate_slug(title),
        };
        if slug.is_empty() {
            return Err(PublishError::validation(
                "slug",
                "title yields an empty slug; supply one explicitly",
            ));
        }

        let mut entities = self.entities.write();
        check_slug_free(&entities, config, &slug, None)?;

        let entity = ContentEntity {
            id: Uuid::new_v4(),
            canonical: CanonicalFields {
                title: title.to_owned(),
                slug,
                excerpt: new.excerpt,
                hero_image: new.hero_image,
                body: new.body,
                tags: new.tags,
                seo: new.seo,
            },
            translations: BTreeMap::new(),
            status: Status::Draft,
            published_at: None,
            updated_at: Utc::now(),
        };
        entities.insert(entity.id, entity.clone());
        Ok(entity)
    }

    /// Merge a partial patch into the canonical fields or one locale's
    /// override bundle. Always advances `updatedAt`; never touches `id`,
    /// `status`, or `publishedAt`.
    pub fn update(&self, id: Uuid, patch: EntityPatch, config: &SiteConfig) -> Result<ContentEntity> {
        let mut entities = self.entities.write();
        if !entities.contains_key(&id) {
            return Err(PublishError::NotFound(id));
        }

        match patch {
            EntityPatch::Canonical(patch) => {
                if let Some(title) = &patch.title {
                    let title = title.trim();
                    if title.is_empty() {
                        return Err(PublishError::validation("title", "must not be empty"));
                    }
                    if title.chars().count() > config.content.max_title_len {
                        return Err(PublishError::validation(
                            "title",
                            format!("exceeds {} characters", config.content.max_title_len),
                        ));
                    }
                }
                if let Some(slug) = &patch.slug {
                    if !is_valid_slug(slug) {
                        return Err(PublishError::validation(
                            "slug",
                            format!("`{slug}` is not in slug form"),
                        ));
                    }
                    check_slug_free(&entities, config, slug, Some(id))?;
                }

                let entity = entities
                    .get_mut(&id)
                    .ok_or(PublishError::NotFound(id))?;
                let canonical = &mut entity.canonical;
                if let Some(title) = patch.title {
                    canonical.title = title.trim().to_owned();
                }
                if let Some(slug) = patch.slug {
                    canonical.slug = slug;
                }
                if let Some(excerpt) = patch.excerpt {
                    canonical.excerpt = non_empty(excerpt);
                }
                if let Some(hero_image) = patch.hero_image {
                    canonical.hero_image = non_empty(hero_image);
                }
                if let Some(body) = patch.body {
                    canonical.body = body;
                }
                if let Some(tags) = patch.tags {
                    canonical.tags = tags;
                }
                if let Some(seo) = patch.seo {
                    canonical.seo = seo;
                }
                entity.updated_at = Utc::now();
                Ok(entity.clone())
            }
            EntityPatch::Translation(locale, bundle) => {
                if !config.locales.is_supported(&locale) {
                    return Err(PublishError::validation(
                        "locale",
                        format!("`{locale}` is not a supported locale"),
                    ));
                }
                if let Some(slug) = &bundle.slug {
                    // Locale slug overrides follow the same policy as
                    // canonical slugs: collide -> reject.
                    if !slug.is_empty() && !is_valid_slug(slug) {
                        return Err(PublishError::validation(
                            "slug",
                            format!("`{slug}` is not in slug form"),
                        ));
                    }
                    if !slug.is_empty() {
                        check_locale_slug_free(&entities, config, slug, &locale, id)?;
                    }
                }

                let entity = entities
                    .get_mut(&id)
                    .ok_or(PublishError::NotFound(id))?;
                let existing = entity.translations.entry(locale).or_default();
                merge_override(existing, bundle);
                entity.updated_at = Utc::now();
                Ok(entity.clone())
            }
        }
    }

    /// Transition an entity to published.
    ///
    /// Sets `publishedAt` only on the first transition; re-publishing
    /// keeps the original date so feed chronology never shifts.
    pub fn publish(&self, id: Uuid) -> Result<ContentEntity> {
        let mut entities = self.entities.write();
        let entity = entities.get_mut(&id).ok_or(PublishError::NotFound(id))?;

        entity.status = Status::Published;
        if entity.published_at.is_none() {
            entity.published_at = Some(Utc::now());
        }
        entity.updated_at = Utc::now();

        log!("publish"; "{} `{}`", entity.id, entity.canonical.slug);
        Ok(entity.clone())
    }

    /// Return an entity to draft without clearing `publishedAt`, so a
    /// later re-publish keeps its place in the feed chronology.
    pub fn unpublish(&self, id: Uuid) -> Result<ContentEntity> {
        let mut entities = self.entities.write();
        let entity = entities.get_mut(&id).ok_or(PublishError::NotFound(id))?;

        entity.status = Status::Draft;
        entity.updated_at = Utc::now();
        Ok(entity.clone())
    }

    /// Fetch an entity by id regardless of status (editorial tooling).
    pub fn get(&self, id: Uuid) -> Result<ContentEntity> {
        self.entities
            .read()
            .get(&id)
            .cloned()
            .ok_or(PublishError::NotFound(id))
    }

    /// Public read path: the published entity whose effective slug in
    /// `locale` matches, resolved into that locale.
    pub fn get_by_slug(
        &self,
        slug: &str,
        locale: &LocaleCode,
        config: &SiteConfig,
    ) -> Result<EffectiveView> {
        let resolver = LocaleResolver::new(config);
        let locale = config.locales.resolve_requested(locale);

        let entities = self.entities.read();
        entities
            .values()
            .filter(|e| e.is_published())
            .find(|e| resolver.effective_slug(e, locale) == slug)
            .map(|e| resolver.resolve(e, locale))
            .ok_or_else(|| PublishError::SlugNotFound(slug.to_owned()))
    }

    /// Public read path: published entities, newest first, resolved into
    /// the filter's locale.
    pub fn list_published(
        &self,
        filter: &ListFilter,
        page: Pagination,
        config: &SiteConfig,
    ) -> Page<EffectiveView> {
        let resolver = LocaleResolver::new(config);
        let locale = filter
            .locale
            .as_ref()
            .map_or(&config.locales.default, |l| config.locales.resolve_requested(l));

        let entities = self.entities.read();
        let mut matching: Vec<&ContentEntity> = entities
            .values()
            .filter(|e| e.is_published())
            .filter(|e| {
                filter
                    .tag
                    .as_ref()
                    .is_none_or(|tag| e.canonical.tags.iter().any(|t| t == tag))
            })
            .collect();

        matching.sort_by(|a, b| {
            compare_recent(
                &a.published_at,
                &b.published_at,
                &a.canonical.title,
                &b.canonical.title,
            )
        });

        let total = matching.len();
        let per_page = page.per_page.clamp(1, 100);
        let current = page.page.max(1);
        let items = matching
            .into_iter()
            .skip((current - 1) * per_page)
            .take(per_page)
            .map(|e| resolver.resolve(e, locale))
            .collect();

        Page {
            items,
            total,
            page: current,
            per_page,
        }
    }

    /// Back-reference cleanup when a tag is deleted elsewhere: strip the
    /// tag from every entity carrying it. Returns the number of entities
    /// changed; only those have their `updatedAt` advanced.
    pub fn remove_tag_everywhere(&self, tag: &str) -> usize {
        let mut entities = self.entities.write();
        let mut changed = 0;

        for entity in entities.values_mut() {
            let before = entity.canonical.tags.len();
            entity.canonical.tags.retain(|t| t != tag);
            if entity.canonical.tags.len() != before {
                entity.updated_at = Utc::now();
                changed += 1;
            }
        }

        if changed > 0 {
            log!("tags"; "removed `{tag}` from {changed} entities");
        }
        changed
    }

    /// Serialize every entity to pretty JSON (exports, debugging).
    pub fn to_json(&self) -> String {
        let entities: Vec<_> = self.entities.read().values().cloned().collect();
        serde_json::to_string_pretty(&entities).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }
}

impl ContentSource for ContentStore {
    fn published(&self) -> Result<Vec<ContentEntity>> {
        Ok(self
            .entities
            .read()
            .values()
            .filter(|e| e.is_published())
            .cloned()
            .collect())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Compare publish instants for sorting (newest first).
///
/// - Entities with dates come before entities without
/// - Same date sorts by title
fn compare_recent(
    a_date: &Option<DateTime<Utc>>,
    b_date: &Option<DateTime<Utc>>,
    a_title: &str,
    b_title: &str,
) -> Ordering {
    match (b_date, a_date) {
        (Some(date_b), Some(date_a)) => date_b.cmp(date_a),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a_title.cmp(b_title),
    }
}

/// Reject `slug` when it matches any entity's effective slug in any
/// supported locale. `exclude` skips the entity being edited.
fn check_slug_free(
    entities: &BTreeMap<Uuid, ContentEntity>,
    config: &SiteConfig,
    slug: &str,
    exclude: Option<Uuid>,
) -> Result<()> {
    let resolver = LocaleResolver::new(config);

    for entity in entities.values() {
        if Some(entity.id) == exclude {
            continue;
        }
        if entity.canonical.slug == slug {
            return Err(PublishError::conflict(slug, "canonical"));
        }
        for locale in &config.locales.supported {
            if resolver.effective_slug(entity, locale) == slug {
                return Err(PublishError::conflict(slug, locale.as_str()));
            }
        }
    }
    Ok(())
}

/// Reject a locale slug override colliding with another entity's
/// effective slug in the same locale namespace.
fn check_locale_slug_free(
    entities: &BTreeMap<Uuid, ContentEntity>,
    config: &SiteConfig,
    slug: &str,
    locale: &LocaleCode,
    exclude: Uuid,
) -> Result<()> {
    let resolver = LocaleResolver::new(config);

    for entity in entities.values() {
        if entity.id == exclude {
            continue;
        }
        if resolver.effective_slug(entity, locale) == slug {
            return Err(PublishError::conflict(slug, locale.as_str()));
        }
    }
    Ok(())
}

/// Merge an incoming bundle over an existing one, field-wise.
///
/// `Some` replaces; an empty string is kept as-is, which the resolver
/// treats as inheritance, so editors can clear an override that way.
fn merge_override(existing: &mut OverrideBundle, incoming: OverrideBundle) {
    if incoming.title.is_some() {
        existing.title = incoming.title;
    }
    if incoming.slug.is_some() {
        existing.slug = incoming.slug;
    }
    if incoming.excerpt.is_some() {
        existing.excerpt = incoming.excerpt;
    }
    if incoming.hero_image.is_some() {
        existing.hero_image = incoming.hero_image;
    }
    if incoming.body.is_some() {
        existing.body = incoming.body;
    }
    let seo = incoming.seo;
    if seo.meta_title.is_some() {
        existing.seo.meta_title = seo.meta_title;
    }
    if seo.meta_description.is_some() {
        existing.seo.meta_description = seo.meta_description;
    }
    if seo.keywords.is_some() {
        existing.seo.keywords = seo.keywords;
    }
    if seo.social_title.is_some() {
        existing.seo.social_title = seo.social_title;
    }
    if seo.social_description.is_some() {
        existing.seo.social_description = seo.social_description;
    }
    if seo.social_image.is_some() {
        existing.seo.social_image = seo.social_image;
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

// ============================================================================
// Tests
// ============================================================================
