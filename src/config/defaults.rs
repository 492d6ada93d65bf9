//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn source_ext() -> String {
        "markdown".into()
    }

    pub fn output_ext() -> String {
        "html".into()
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn index_slug() -> String {
        "index".into()
    }
}

// ============================================================================
// [converter] Section Defaults
// ============================================================================

pub mod converter {
    pub fn command() -> Vec<String> {
        vec!["multimarkdown".into()]
    }

    pub fn timeout_secs() -> u64 {
        30
    }
}
