use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AilocConfig {
    pub source_lang: Option<String>,
    pub model: Option<String>,
    pub out_dir: Option<String>,
    pub translate: Option<TranslateCfg>,
    pub missing: Option<MissingCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslateCfg {
    pub missing_only: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MissingCfg {
    pub strict: Option<bool>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Other(String),
}

/// Search order: CWD/ailoc.toml, then $CONFIG_DIR/ailoc/ailoc.toml.
/// Earlier files win field by field; a missing or unparsable file is ignored.
pub fn load_config() -> Result<AilocConfig, ConfigError> {
    let mut merged = AilocConfig::default();
    if let Ok(p) = std::env::current_dir() {
        merged = merge(merged, read_file(&p.join("ailoc.toml")));
    }
    if let Some(base) = dirs::config_dir() {
        merged = merge(merged, read_file(&base.join("ailoc").join("ailoc.toml")));
    }
    Ok(merged)
}

fn read_file(path: &Path) -> AilocConfig {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| toml::from_str::<AilocConfig>(&s).ok())
        .unwrap_or_default()
}

fn merge(mut a: AilocConfig, b: AilocConfig) -> AilocConfig {
    if a.source_lang.is_none() {
        a.source_lang = b.source_lang;
    }
    if a.model.is_none() {
        a.model = b.model;
    }
    if a.out_dir.is_none() {
        a.out_dir = b.out_dir;
    }
    a.translate = merge_opt(a.translate, b.translate, merge_translate);
    a.missing = merge_opt(a.missing, b.missing, merge_missing);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_translate(mut a: TranslateCfg, b: TranslateCfg) -> TranslateCfg {
    if a.missing_only.is_none() {
        a.missing_only = b.missing_only;
    }
    a
}

fn merge_missing(mut a: MissingCfg, b: MissingCfg) -> MissingCfg {
    if a.strict.is_none() {
        a.strict = b.strict;
    }
    a
}
