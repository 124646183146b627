//! Projections over the content store: sitemap entries and RSS feeds.
//!
//! Projectors are pure readers. They consume published entities through
//! the [`crate::store::ContentSource`] seam and degrade gracefully when
//! the store is unreachable instead of failing the surrounding build.

mod feed;
mod sitemap;

pub use feed::build_feed;
pub use sitemap::{SitemapEntry, SitemapProjector, build_sitemap};
