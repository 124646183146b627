//! URL slug derivation.
//!
//! Turns a display title into a URL-safe identifier: transliterate to
//! ASCII, lowercase, collapse every run of characters outside `[a-z0-9]`
//! into a single hyphen, strip edge hyphens.
//!
//! Uniqueness is not this module's job. The content store checks the
//! derived slug against its scope and rejects collisions.

use deunicode::deunicode;

// ============================================================================
// Slug Generation
// ============================================================================

/// Derive a URL slug from a display title.
///
/// Total and deterministic: never fails, empty input yields an empty
/// string, and the function is idempotent (`generate_slug(generate_slug(t))
/// == generate_slug(t)`).
///
/// # Examples
///
/// | Input                | Output          |
/// |----------------------|-----------------|
/// | `"Hello, World!"`    | `"hello-world"` |
/// | `"  Über uns  "`     | `"uber-uns"`    |
/// | `"---"`              | `""`            |
pub fn generate_slug(title: &str) -> String {
    let ascii = deunicode(title);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    for c in ascii.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// True when `slug` is already in canonical slug form.
///
/// Used at the store boundary to accept caller-supplied slugs without
/// silently rewriting them.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && generate_slug(slug) == slug
}

// ============================================================================
// Tests
// ============================================================================
