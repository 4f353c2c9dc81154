use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Dry-run output: what a translate run would do, with zero API calls.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TranslationPlan {
    pub schema_version: u32,
    pub input: String,
    pub source_lang: String,
    pub strings: usize,
    pub sections: usize,
    pub languages: Vec<PlannedLanguage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlannedLanguage {
    pub lang: String,
    /// Keys that would be sent to the service for this language.
    pub pending: usize,
    /// True when an existing artifact already covers every source key.
    pub already_complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TranslateSummary {
    pub schema_version: u32,
    pub mode: String,
    pub source_lang: String,
    pub strings: usize,
    pub sections: usize,
    pub languages: Vec<LanguageReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LanguageReport {
    pub lang: String,
    /// "translated" | "skipped"
    pub status: String,
    /// Sections actually sent to the service.
    pub sections: usize,
    /// Keys actually translated in this run.
    pub keys_translated: usize,
    /// Keys carried over unchanged from the existing artifact.
    pub keys_merged: usize,
    pub out_path: String,
}

/// Coverage audit: source keys never translated into any compared locale.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MissingReport {
    pub schema_version: u32,
    pub reference: String,
    pub compared: Vec<String>,
    pub missing: Vec<String>,
}
