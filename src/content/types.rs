//! Persisted content shapes.
//!
//! A `ContentEntity` carries one canonical field set (the fallback of
//! last resort) plus a map of per-locale override bundles. Overrides are
//! partial by design: an absent or empty field inherits the canonical
//! value. The resolver in [`crate::content::resolve`] computes the
//! effective per-locale view; nothing here performs fallback itself.

use crate::content::{ContentBlock, LocaleCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// Entity
// ============================================================================

/// Publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Draft,
    Published,
}

/// A content entity (blog post).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEntity {
    /// Stable opaque identifier, assigned at creation, immutable.
    pub id: Uuid,

    /// Default-language field values, the fallback for every locale.
    pub canonical: CanonicalFields,

    /// Per-locale override bundles.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<LocaleCode, OverrideBundle>,

    /// Only `published` entities are exposed through public read paths.
    #[serde(default)]
    pub status: Status,

    /// Set once on first transition to published, never regressed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// Advances on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl ContentEntity {
    /// True when public read paths may return this entity.
    pub const fn is_published(&self) -> bool {
        matches!(self.status, Status::Published)
    }

    /// The override bundle for a locale, if that locale was ever touched.
    pub fn translation(&self, locale: &LocaleCode) -> Option<&OverrideBundle> {
        self.translations.get(locale)
    }

    /// Last-modified instant for projections: `updatedAt`, falling back
    /// to `publishedAt` when unset.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.published_at.map_or(self.updated_at, |p| self.updated_at.max(p))
    }
}

// ============================================================================
// Canonical Fields
// ============================================================================

/// The canonical (default-language) field set of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFields {
    /// Display title.
    pub title: String,

    /// URL slug, unique among entities in the same scope.
    pub slug: String,

    /// Short summary for listings and feed descriptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Hero image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,

    /// Ordered sequence of typed content blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<ContentBlock>,

    /// Tags for listing filters; names referenced by the tag collection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// SEO metadata bundle.
    #[serde(default)]
    pub seo: SeoBundle,
}

/// SEO metadata attached to the canonical fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_image: Option<String>,
}

// ============================================================================
// Override Bundles
// ============================================================================

/// A locale's partial field set.
///
/// Same shape as [`CanonicalFields`] minus identifiers, every field
/// optional. Absent or empty means "inherit the canonical value".
/// Created empty when a locale is first touched; never required to be
/// complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,

    /// An override replaces the entire block sequence; blocks are
    /// positional, so there is no per-block merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<ContentBlock>>,

    #[serde(default)]
    pub seo: SeoOverride,
}

/// Per-field SEO overrides; same fallback rule as the parent bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeoOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_image: Option<String>,
}

impl OverrideBundle {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.excerpt.is_none()
            && self.hero_image.is_none()
            && self.body.is_none()
            && self.seo == SeoOverride::default()
    }
}

// ============================================================================
// Tests
// ============================================================================
