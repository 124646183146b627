//! Pressroom - localized content publishing core.
//!
//! The publishing model behind a multilingual blog: every content
//! entity carries one canonical field set plus per-locale override
//! bundles with defined fallback semantics, ordered collections keep a
//! dense rank invariant under insert/move/delete, and slugs stay unique
//! per scope and per locale namespace.
//!
//! # Components
//!
//! | Module        | Responsibility                                      |
//! |---------------|-----------------------------------------------------|
//! | [`config`]    | `pressroom.toml` - site, locales, projection toggles|
//! | [`content`]   | entity model, slugs, typed blocks, locale resolver  |
//! | [`store`]     | publishing store + dense-ranked collections         |
//! | [`generator`] | sitemap and RSS feed projections                    |
//! | [`error`]     | the `PublishError` taxonomy                         |
//!
//! # Example
//!
//! ```
//! use pressroom::config::SiteConfig;
//! use pressroom::content::LocaleCode;
//! use pressroom::store::{ContentStore, NewPost};
//!
//! let config = SiteConfig::default();
//! let store = ContentStore::new();
//!
//! let post = store
//!     .create(
//!         NewPost {
//!             title: "Hello, World!".into(),
//!             ..Default::default()
//!         },
//!         &config,
//!     )
//!     .unwrap();
//! store.publish(post.id).unwrap();
//!
//! let view = store
//!     .get_by_slug("hello-world", &LocaleCode::new("en"), &config)
//!     .unwrap();
//! assert_eq!(view.path, "/en/post/hello-world");
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod log;
pub mod store;

pub use error::{PublishError, Result};
