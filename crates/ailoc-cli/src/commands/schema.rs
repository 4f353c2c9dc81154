use std::fs;

pub fn run_schema(out_dir: std::path::PathBuf) -> color_eyre::Result<()> {
    fs::create_dir_all(&out_dir)?;
    macro_rules! dump {
        ($ty:ty, $name:literal) => {{
            let schema = schemars::schema_for!($ty);
            let path = out_dir.join($name);
            let f = std::fs::File::create(&path)?;
            serde_json::to_writer_pretty(f, &schema)?;
        }};
    }
    dump!(ailoc_domain::TranslationPlan, "translation_plan.schema.json");
    dump!(
        ailoc_domain::TranslateSummary,
        "translate_summary.schema.json"
    );
    dump!(ailoc_domain::MissingReport, "missing_report.schema.json");
    crate::ui_ok!("schemas written to {}", out_dir.display());
    Ok(())
}
