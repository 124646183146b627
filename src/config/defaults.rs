//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> String {
        "https://example.com".into()
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn email() -> String {
        "editor@noreply.pressroom".into()
    }
}

// ============================================================================
// [locales] Section Defaults
// ============================================================================

pub mod locales {
    use crate::content::LocaleCode;

    pub fn supported() -> Vec<LocaleCode> {
        vec![LocaleCode::new("en")]
    }

    pub fn default() -> LocaleCode {
        LocaleCode::new("en")
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    pub fn max_title_len() -> usize {
        200
    }

    pub fn path_prefix() -> String {
        "post".into()
    }
}
