use std::path::PathBuf;

pub fn run_missing(
    input: PathBuf,
    locales: PathBuf,
    format: String,
    strict: bool,
    use_color: bool,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "missing_args", input = ?input, locales = ?locales, strict = strict);
    let cfg = ailoc_config::load_config().unwrap_or_default();
    let strict = strict || cfg.missing.and_then(|m| m.strict).unwrap_or(false);

    let tree = ailoc_parsers_json::read_tree(&input)?;
    let reference = ailoc_parsers_json::flatten(&tree)?;
    let canonical_input = input.canonicalize().ok();

    let mut paths: Vec<PathBuf> = std::fs::read_dir(&locales)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    paths.sort();

    let mut compared = Vec::new();
    let mut comparisons = Vec::new();
    for path in paths {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if !is_json {
            continue;
        }
        // Never compare the reference against itself.
        if let (Some(a), Ok(b)) = (canonical_input.as_deref(), path.canonicalize()) {
            if a == b {
                continue;
            }
        }
        let tree = ailoc_parsers_json::read_tree(&path)?;
        comparisons.push(ailoc_parsers_json::flatten(&tree)?);
        compared.push(path.display().to_string());
    }
    tracing::info!(
        event = "missing_compared",
        reference_keys = reference.len(),
        locales = comparisons.len()
    );

    let missing = ailoc_services::find_missing_keys(&reference, &comparisons);

    if format == "json" {
        let report = ailoc_domain::MissingReport {
            schema_version: ailoc_domain::SCHEMA_VERSION,
            reference: input.display().to_string(),
            compared,
            missing: missing.clone(),
        };
        serde_json::to_writer(std::io::stdout().lock(), &report)?;
        println!();
    } else if missing.is_empty() {
        crate::ui_ok!(
            "all {} key(s) are covered by at least one locale",
            reference.len()
        );
    } else {
        for key in &missing {
            if use_color {
                use owo_colors::OwoColorize;
                println!("  {}", key.yellow());
            } else {
                println!("  {key}");
            }
        }
        crate::ui_warn!(
            "{} of {} key(s) never translated into any locale",
            missing.len(),
            reference.len()
        );
    }

    if strict && !missing.is_empty() {
        color_eyre::eyre::bail!("{} untranslated key(s)", missing.len());
    }
    Ok(())
}
