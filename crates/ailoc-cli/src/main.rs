use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "ailoc", version, about = "AI-assisted locale translation toolkit")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Suppress console log lines (the file log stays on)
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a source locale JSON tree into one or more target languages
    Translate {
        /// Source locale file (root must be a JSON object)
        #[arg(short, long)]
        input: PathBuf,
        /// Source language tag
        #[arg(short = 'f', long)]
        from: Option<String>,
        /// Target language tags, comma separated
        #[arg(short = 't', long, value_delimiter = ',', required = true)]
        to: Vec<String>,
        /// Directory for per-language output artifacts
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Completion model identifier
        #[arg(long)]
        model: Option<String>,
        /// Report the work without calling the API or writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// Translate only keys missing from each existing output artifact
        #[arg(long, default_value_t = false)]
        missing_only: bool,
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Report source keys never translated into any locale in a directory
    Missing {
        /// Reference locale file
        #[arg(short, long)]
        input: PathBuf,
        /// Directory whose other *.json files are the compared locales
        #[arg(short, long)]
        locales: PathBuf,
        #[arg(long, default_value = "text")]
        format: String,
        /// Exit non-zero when any key is missing
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Dump JSON Schemas of the report types
    Schema {
        #[arg(long, default_value = "docs/schemas")]
        out_dir: PathBuf,
    },
}

fn init_tracing(quiet: bool) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = rolling::daily("logs", "ailoc.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Console logs go to stderr so stdout stays parseable (JSON output).
    let console_layer = (!quiet).then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
    });

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _guard = init_tracing(cli.quiet);

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    let result = match cli.cmd {
        Commands::Translate {
            input,
            from,
            to,
            out_dir,
            model,
            dry_run,
            missing_only,
            format,
        } => commands::translate::run_translate(
            input,
            from,
            to,
            out_dir,
            model,
            dry_run,
            missing_only,
            format,
        ),
        Commands::Missing {
            input,
            locales,
            format,
            strict,
        } => commands::missing::run_missing(input, locales, format, strict, use_color),
        Commands::Schema { out_dir } => commands::schema::run_schema(out_dir),
    };

    if let Err(e) = &result {
        tracing::error!(event = "command_failed", error = %e);
    }
    result
}
