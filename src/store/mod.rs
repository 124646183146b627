//! Persistence boundary: the content publishing store and the
//! dense-ranked ordered collection maintainer.
//!
//! Both stores keep their interior behind a `parking_lot::RwLock` and
//! apply each logical operation inside a single write-lock critical
//! section, which is what makes multi-record mutations (rank shifts,
//! slug check-then-insert) atomic under concurrent callers.

mod content;
mod ordered;

pub use content::{
    CanonicalPatch, ContentSource, ContentStore, EntityPatch, ListFilter, NewPost, Page,
    Pagination,
};
pub use ordered::{FaqItem, NewFaqItem, OrderedCollection};
