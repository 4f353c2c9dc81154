use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ailoc_core::{FlatMap, Result, SectionMap, UnitTranslator};
use color_eyre::eyre::WrapErr;
use ailoc_domain::{
    LanguageReport, PlannedLanguage, TranslateSummary, TranslationPlan, SCHEMA_VERSION,
};
use ailoc_parsers_json as parsers;

use crate::missing::find_missing_keys;

#[derive(Debug, Clone)]
pub struct TranslateOptions {
    pub input: PathBuf,
    pub source_lang: String,
    pub target_langs: Vec<String>,
    pub out_dir: PathBuf,
    /// Incremental mode: read the existing artifact per language, translate
    /// only keys it lacks, merge before persisting.
    pub missing_only: bool,
}

fn artifact_path(out_dir: &Path, lang: &str) -> PathBuf {
    out_dir.join(format!("{lang}.json"))
}

fn load_source_flat(input: &Path) -> Result<FlatMap> {
    let tree = parsers::read_tree(input)?;
    parsers::flatten(&tree)
}

/// Flatten a previously written artifact, if one exists.
fn load_existing_flat(path: &Path) -> Result<Option<FlatMap>> {
    if !path.is_file() {
        return Ok(None);
    }
    let tree = parsers::read_tree(path)?;
    Ok(Some(parsers::flatten(&tree)?))
}

/// Keep only the sections/remainders whose full dotted key is wanted.
/// Sections left empty disappear entirely, so no unit call is issued for
/// them.
fn restrict_sections(sections: &SectionMap, wanted_keys: &[String]) -> SectionMap {
    let wanted: HashSet<&str> = wanted_keys.iter().map(String::as_str).collect();
    let mut out = SectionMap::new();
    for (section, strings) in sections {
        let mut keep = FlatMap::new();
        for (remainder, value) in strings {
            let full = if remainder.is_empty() {
                section.clone()
            } else {
                format!("{section}.{remainder}")
            };
            if wanted.contains(full.as_str()) {
                keep.insert(remainder.clone(), value.clone());
            }
        }
        if !keep.is_empty() {
            out.insert(section.clone(), keep);
        }
    }
    out
}

/// Union of the existing artifact and the freshly translated keys, with the
/// fresh value winning on collision. Display order follows the source tree's
/// first-seen order; stale keys only present in the existing artifact are
/// appended after and survive the merge.
fn merge_flat(source: &FlatMap, existing: &FlatMap, translated: &FlatMap) -> FlatMap {
    let mut merged = FlatMap::new();
    for key in source.keys() {
        if let Some(value) = translated.get(key).or_else(|| existing.get(key)) {
            merged.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in existing {
        if !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Dry-run branch: everything up to (but excluding) client calls. Reports
/// how much work each target language would cost; persists nothing.
pub fn plan(opts: &TranslateOptions) -> Result<TranslationPlan> {
    let flat = load_source_flat(&opts.input)?;
    let sections = parsers::group_sections(&flat);
    tracing::info!(
        event = "plan_built",
        strings = flat.len(),
        sections = sections.len()
    );

    let mut languages = Vec::new();
    for lang in &opts.target_langs {
        let (pending, already_complete) = if opts.missing_only {
            match load_existing_flat(&artifact_path(&opts.out_dir, lang))? {
                Some(existing) => {
                    let missing = find_missing_keys(&flat, std::slice::from_ref(&existing));
                    (missing.len(), missing.is_empty())
                }
                None => (flat.len(), false),
            }
        } else {
            (flat.len(), false)
        };
        languages.push(PlannedLanguage {
            lang: lang.clone(),
            pending,
            already_complete,
        });
    }

    Ok(TranslationPlan {
        schema_version: SCHEMA_VERSION,
        input: opts.input.display().to_string(),
        source_lang: opts.source_lang.clone(),
        strings: flat.len(),
        sections: sections.len(),
        languages,
    })
}

/// The end-to-end run: load → flatten → group → per-language sequential
/// loop → reassemble → merge → persist. Unit calls are strictly sequential;
/// the first failure aborts the whole run, leaving the in-flight language's
/// artifact untouched and earlier languages' artifacts valid.
pub fn translate_all(
    opts: &TranslateOptions,
    translator: &dyn UnitTranslator,
) -> Result<TranslateSummary> {
    let flat = load_source_flat(&opts.input)?;
    let sections = parsers::group_sections(&flat);
    tracing::info!(
        event = "source_loaded",
        input = %opts.input.display(),
        strings = flat.len(),
        sections = sections.len()
    );

    let mut reports = Vec::new();
    for lang in &opts.target_langs {
        let path = artifact_path(&opts.out_dir, lang);

        let existing = if opts.missing_only {
            load_existing_flat(&path)?
        } else {
            None
        };

        let todo = match &existing {
            Some(existing_map) => {
                let missing = find_missing_keys(&flat, std::slice::from_ref(existing_map));
                if missing.is_empty() {
                    tracing::info!(event = "lang_already_complete", lang = %lang);
                    reports.push(LanguageReport {
                        lang: lang.clone(),
                        status: "skipped".to_string(),
                        sections: 0,
                        keys_translated: 0,
                        keys_merged: existing_map.len(),
                        out_path: path.display().to_string(),
                    });
                    continue;
                }
                tracing::info!(event = "lang_incremental", lang = %lang, missing = missing.len());
                restrict_sections(&sections, &missing)
            }
            None => sections.clone(),
        };

        let mut translated_sections = SectionMap::new();
        for (section, strings) in &todo {
            tracing::info!(
                event = "unit_translate",
                lang = %lang,
                section = %section,
                keys = strings.len()
            );
            let reply = translator
                .translate_unit(section, strings, &opts.source_lang, lang)
                .wrap_err_with(|| {
                    format!("translating section '{section}' for language '{lang}'")
                })?;
            translated_sections.insert(section.clone(), reply);
        }

        let translated_flat = parsers::ungroup_sections(&translated_sections);
        let final_flat = match &existing {
            Some(existing_map) => merge_flat(&flat, existing_map, &translated_flat),
            None => translated_flat.clone(),
        };

        let tree = parsers::unflatten(&final_flat)?;
        parsers::write_tree(&path, &tree)?;
        tracing::info!(event = "lang_written", lang = %lang, path = %path.display());

        reports.push(LanguageReport {
            lang: lang.clone(),
            status: "translated".to_string(),
            sections: todo.len(),
            keys_translated: translated_flat.len(),
            keys_merged: final_flat.len() - translated_flat.len(),
            out_path: path.display().to_string(),
        });
    }

    Ok(TranslateSummary {
        schema_version: SCHEMA_VERSION,
        mode: if opts.missing_only { "missing-only" } else { "full" }.to_string(),
        source_lang: opts.source_lang.clone(),
        strings: flat.len(),
        sections: sections.len(),
        languages: reports,
    })
}
