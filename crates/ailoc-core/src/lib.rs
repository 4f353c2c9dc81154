use std::path::PathBuf;

use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Flat mapping from dotted key path ("auth.login.title") to string value.
/// Insertion order follows first-seen order while flattening and is preserved
/// all the way to the written artifact.
pub type FlatMap = indexmap::IndexMap<String, String>;

/// Sections keyed by the first path segment; values map the *remainder* of
/// the dotted path (empty string when the key had no dot) to the string.
pub type SectionMap = indexmap::IndexMap<String, FlatMap>;

/// One translation unit call: a whole section round-trips through the
/// completion service as a single request.
///
/// The reply must carry exactly the same key set as `strings` and preserve
/// every placeholder token; implementations validate and fail rather than
/// repair. Retry policy belongs to the caller.
pub trait UnitTranslator {
    fn translate_unit(
        &self,
        section: &str,
        strings: &FlatMap,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<FlatMap>;
}

/// Fatal error taxonomy. Every variant aborts the run; the only recovery
/// path is re-invoking with missing-only mode.
#[derive(Debug, Error)]
pub enum AilocError {
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("input root must be a JSON object: {path}")]
    InvalidInputShape { path: PathBuf },

    #[error("array values are not supported (key '{key}')")]
    UnsupportedArray { key: String },

    #[error("missing API credential: set the {var} environment variable")]
    MissingCredential { var: &'static str },

    #[error("cannot parse reply for section '{section}': {reason} (reply starts with: {excerpt:?})")]
    ResponseParse {
        section: String,
        reason: String,
        excerpt: String,
    },

    #[error("key set mismatch in section '{section}': expected {expected:?}, got {actual:?}")]
    KeySetMismatch {
        section: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("placeholder {token:?} from key '{key}' (section '{section}') was dropped or altered")]
    PlaceholderMismatch {
        section: String,
        key: String,
        token: String,
    },

    #[error("conflicting key paths at '{key}': a value and a nested object share the same path")]
    StructuralConflict { key: String },

    #[error("failed to write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
