use std::path::PathBuf;

use ailoc_services::TranslateOptions;
use ailoc_translate::{OpenAiTranslator, DEFAULT_MODEL};

#[allow(clippy::too_many_arguments)]
pub fn run_translate(
    input: PathBuf,
    from: Option<String>,
    to: Vec<String>,
    out_dir: Option<PathBuf>,
    model: Option<String>,
    dry_run: bool,
    missing_only: bool,
    format: String,
) -> color_eyre::Result<()> {
    tracing::debug!(
        event = "translate_args",
        input = ?input,
        from = ?from,
        to = ?to,
        out_dir = ?out_dir,
        model = ?model,
        dry_run = dry_run,
        missing_only = missing_only
    );
    let cfg = ailoc_config::load_config().unwrap_or_default();

    let source_lang = from.or(cfg.source_lang).unwrap_or_else(|| "en".to_string());
    let model = model.or(cfg.model).unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let out_dir = out_dir
        .or_else(|| cfg.out_dir.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("locales"));
    let missing_only =
        missing_only || cfg.translate.and_then(|t| t.missing_only).unwrap_or(false);

    let opts = TranslateOptions {
        input,
        source_lang,
        target_langs: to,
        out_dir,
        missing_only,
    };

    if dry_run {
        let plan = ailoc_services::plan(&opts)?;
        if format == "json" {
            serde_json::to_writer(std::io::stdout().lock(), &plan)?;
            println!();
        } else {
            crate::ui_out!(
                "dry-run: {} string(s) in {} section(s) from {}",
                plan.strings,
                plan.sections,
                plan.input
            );
            for lang in &plan.languages {
                if lang.already_complete {
                    crate::ui_out!("  {}: already complete", lang.lang);
                } else {
                    crate::ui_out!("  {}: would translate {} key(s)", lang.lang, lang.pending);
                }
            }
        }
        return Ok(());
    }

    // Credential check comes first: a missing key must fail the run before
    // any input is parsed or any language is touched.
    let translator = OpenAiTranslator::from_env(model)?;
    let summary = ailoc_services::translate_all(&opts, &translator)?;

    if format == "json" {
        serde_json::to_writer(std::io::stdout().lock(), &summary)?;
        println!();
    } else {
        for lang in &summary.languages {
            if lang.status == "skipped" {
                crate::ui_info!("{}: already complete, nothing sent", lang.lang);
            } else {
                crate::ui_ok!(
                    "{}: translated {} key(s) in {} section(s) -> {}",
                    lang.lang,
                    lang.keys_translated,
                    lang.sections,
                    lang.out_path
                );
            }
        }
    }
    Ok(())
}
