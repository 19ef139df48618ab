// prodsent - product description sentiment statistics

mod analyze;
mod exit_codes;
mod render;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use analyze::AnalyzeArgs;
use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "prodsent")]
#[command(about = "Sentiment statistics for product descriptions")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Debug logging
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a product CSV and print sentiment and word statistics
    #[command(after_help = "\
Examples:
  prodsent analyze products.csv
  prodsent analyze products.csv --words 20
  prodsent analyze products.csv --text-source annotated --stop-words and,the,of
  prodsent analyze products.csv --json > report.json
  prodsent analyze --config prodsent.toml --output report.json

Without FILE, input.file from the config is used, then
./dataset-gymbeam-product-descriptions-eng.csv.")]
    Analyze(AnalyzeArgs),

    /// Validate a config file without running
    #[command(after_help = "\
Examples:
  prodsent validate prodsent.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

/// Logs go to stderr. RUST_LOG takes precedence over -v/-q.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        // No subcommand = analyze the default dataset
        None => analyze::cmd_analyze(AnalyzeArgs {
            config: std::env::var_os("PRODSENT_CONFIG").map(PathBuf::from),
            ..AnalyzeArgs::default()
        }),
        Some(Commands::Analyze(args)) => analyze::cmd_analyze(args),
        Some(Commands::Validate { config }) => analyze::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            log::debug!("exiting with code {code}");
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
