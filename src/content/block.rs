//! Typed content blocks.
//!
//! A post body is an ordered sequence of blocks. The block kind is a
//! closed tagged union, one variant per kind with its own metadata
//! shape, so consumers never null-check an open metadata map.
//!
//! | Kind      | Payload (`content`)    | Extra metadata             |
//! |-----------|------------------------|----------------------------|
//! | paragraph | text                   | -                          |
//! | heading   | text                   | `level` (clamped to 1..=6) |
//! | list      | newline-separated items| `kind` (ordered/unordered) |
//! | image     | URL                    | `alt`, `caption`           |
//! | code      | source text            | `language`                 |
//! | quote     | text                   | `attribution`              |
//!
//! Absent metadata deserializes to the kind's default; it never fails a
//! read. A block whose `content` is empty or whitespace-only is not
//! renderable and is filtered by consumers, not errored on.

use serde::{Deserialize, Serialize};

// ============================================================================
// Block Types
// ============================================================================

/// Valid heading level range (HTML h1-h6).
const HEADING_LEVEL_MIN: u8 = 1;
const HEADING_LEVEL_MAX: u8 = 6;

/// One typed unit of a post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Unique within the entity, stable across edits of sibling blocks.
    pub id: String,

    /// Kind-specific payload and metadata.
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// Closed set of block kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockKind {
    Paragraph {
        #[serde(default)]
        content: String,
    },
    Heading {
        #[serde(default)]
        content: String,
        /// Requested level; read through [`ContentBlock::heading_level`],
        /// which clamps into 1..=6.
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    List {
        /// Newline-separated list items.
        #[serde(default)]
        content: String,
        #[serde(default)]
        kind: ListKind,
    },
    Image {
        /// Image URL.
        #[serde(default)]
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Code {
        #[serde(default)]
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    Quote {
        #[serde(default)]
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribution: Option<String>,
    },
}

/// List rendering kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    #[default]
    Unordered,
    Ordered,
}

fn default_heading_level() -> u8 {
    HEADING_LEVEL_MIN
}

impl ContentBlock {
    /// Short name of the block kind (used in logs and tests).
    pub const fn kind_name(&self) -> &'static str {
        match self.kind {
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::Heading { .. } => "heading",
            BlockKind::List { .. } => "list",
            BlockKind::Image { .. } => "image",
            BlockKind::Code { .. } => "code",
            BlockKind::Quote { .. } => "quote",
        }
    }

    /// The block's primary text/URL payload.
    pub fn content(&self) -> &str {
        match &self.kind {
            BlockKind::Paragraph { content }
            | BlockKind::Heading { content, .. }
            | BlockKind::List { content, .. }
            | BlockKind::Image { content, .. }
            | BlockKind::Code { content, .. }
            | BlockKind::Quote { content, .. } => content,
        }
    }

    /// Heading level clamped into 1..=6; `None` for non-heading blocks.
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            BlockKind::Heading { level, .. } => {
                Some(level.clamp(HEADING_LEVEL_MIN, HEADING_LEVEL_MAX))
            }
            _ => None,
        }
    }

    /// A block with empty or whitespace-only content is not renderable
    /// and is treated as absent by every consumer.
    pub fn is_renderable(&self) -> bool {
        !self.content().trim().is_empty()
    }
}

/// Filter a block sequence down to renderable blocks.
pub fn renderable(blocks: &[ContentBlock]) -> impl Iterator<Item = &ContentBlock> {
    blocks.iter().filter(|b| b.is_renderable())
}

// ============================================================================
// Tests
// ============================================================================
