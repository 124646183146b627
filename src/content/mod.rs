//! Content model: locales, slugs, typed blocks, entities, and the
//! locale fallback resolver.
//!
//! # Fallback semantics
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ ContentEntity                                               │
//! │   canonical: CanonicalFields      (fallback of last resort) │
//! │   translations: locale -> OverrideBundle (partial)          │
//! └─────────────────────────────────────────────────────────────┘
//!                │
//!                ▼  LocaleResolver::resolve(entity, locale)
//! ┌─────────────────────────────────────────────────────────────┐
//! │ EffectiveView - per-field merge, override wins when present │
//! │ and non-empty; `body` replaced as a whole unit              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod block;
mod locale;
mod resolve;
mod slug;
mod types;

pub use block::{BlockKind, ContentBlock, ListKind, renderable};
pub use locale::LocaleCode;
pub use resolve::{EffectiveView, LocaleResolver};
pub use slug::{generate_slug, is_valid_slug};
pub use types::{
    CanonicalFields, ContentEntity, OverrideBundle, SeoBundle, SeoOverride, Status,
};
