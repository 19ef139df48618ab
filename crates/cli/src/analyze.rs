//! `prodsent analyze` and `prodsent validate`.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use prodsent_io::{load_products, InputOptions, LoadError};
use prodsent_stats::{enrich, LexiconClassifier, RunContext, Statistics, StatsConfig, TextSource};

use crate::exit_codes::{EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_IO, EXIT_NO_PRODUCTS, EXIT_USAGE};
use crate::render::{render_human, summary_line};
use crate::CliError;

/// Dataset read when neither the command line nor the config names one.
pub const DEFAULT_DATASET: &str = "dataset-gymbeam-product-descriptions-eng.csv";

#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Product CSV with name,description columns
    pub file: Option<PathBuf>,

    /// TOML config file (default: <config dir>/prodsent/config.toml if present)
    #[arg(long, short = 'c', env = "PRODSENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of most used words to list (negative values list none)
    #[arg(long, short = 'w', allow_negative_numbers = true)]
    pub words: Option<i64>,

    /// Text the word counts are taken from
    #[arg(long, value_enum)]
    pub text_source: Option<TextSourceArg>,

    /// Comma-separated stop words, replacing the configured set
    #[arg(long, value_delimiter = ',')]
    pub stop_words: Option<Vec<String>>,

    /// Output JSON report to stdout instead of the human summary
    #[arg(long)]
    pub json: bool,

    /// Write JSON report to file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TextSourceArg {
    /// Description as loaded
    Raw,
    /// Classifier-tagged description
    Annotated,
}

impl From<TextSourceArg> for TextSource {
    fn from(arg: TextSourceArg) -> Self {
        match arg {
            TextSourceArg::Raw => TextSource::Raw,
            TextSourceArg::Annotated => TextSource::Annotated,
        }
    }
}

fn cli_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError {
        code,
        message: msg.into(),
        hint: None,
    }
}

fn load_err(err: LoadError) -> CliError {
    match err {
        LoadError::NotFound(_) => cli_err(EXIT_IO, err.to_string())
            .with_hint("pass the dataset path: prodsent analyze <FILE>"),
        LoadError::PermissionDenied(_) | LoadError::Io { .. } => cli_err(EXIT_IO, err.to_string()),
        LoadError::Csv(_) => cli_err(EXIT_ERROR, err.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Config resolution
// ---------------------------------------------------------------------------

struct ResolvedConfig {
    config: StatsConfig,
    /// Directory `input.file` is relative to.
    base_dir: PathBuf,
}

fn read_config(path: &Path) -> Result<StatsConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        cli_err(
            EXIT_IO,
            format!("cannot read config '{}': {e}", path.display()),
        )
    })?;
    StatsConfig::from_toml(&text).map_err(|e| {
        cli_err(
            EXIT_INVALID_CONFIG,
            format!("{}: {e}", path.display()),
        )
    })
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("prodsent").join("config.toml"))
}

fn resolve_config(explicit: Option<&Path>) -> Result<ResolvedConfig, CliError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.is_file()),
    };

    match path {
        Some(path) => {
            log::debug!("using config '{}'", path.display());
            let config = read_config(&path)?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok(ResolvedConfig { config, base_dir })
        }
        None => Ok(ResolvedConfig {
            config: StatsConfig::default(),
            base_dir: PathBuf::from("."),
        }),
    }
}

/// Fold command-line flags into the config. Flags win.
fn apply_overrides(config: &mut StatsConfig, args: &AnalyzeArgs) -> Result<(), CliError> {
    if let Some(words) = args.words {
        config.words.limit = usize::try_from(words.max(0)).unwrap_or(usize::MAX);
    }
    if let Some(source) = args.text_source {
        config.words.text_source = source.into();
    }
    if let Some(ref stop_words) = args.stop_words {
        config.words.stop_words = Some(stop_words.clone());
        config.words.extra_stop_words.clear();
    }
    config
        .validate()
        .map_err(|e| cli_err(EXIT_USAGE, e.to_string()))
}

fn dataset_path(args: &AnalyzeArgs, resolved: &ResolvedConfig) -> PathBuf {
    if let Some(ref file) = args.file {
        return file.clone();
    }
    match resolved.config.input.file {
        Some(ref file) => resolved.base_dir.join(file),
        None => PathBuf::from(DEFAULT_DATASET),
    }
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

pub fn cmd_analyze(args: AnalyzeArgs) -> Result<(), CliError> {
    let mut resolved = resolve_config(args.config.as_deref())?;
    apply_overrides(&mut resolved.config, &args)?;
    let path = dataset_path(&args, &resolved);
    let config = &resolved.config;

    let loaded = load_products(&path, &InputOptions::from(&config.input)).map_err(load_err)?;
    if loaded.products.is_empty() {
        return Err(cli_err(
            EXIT_NO_PRODUCTS,
            format!("no products loaded from '{}'", path.display()),
        ));
    }

    let classifier = LexiconClassifier::from_config(&config.classifier)
        .map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))?;
    let enrichment = enrich(loaded.products, &classifier);

    let run = RunContext {
        source: path.display().to_string(),
        skipped: loaded.skipped,
        failures: enrichment.failures,
    };
    let report = Statistics::new(&enrichment.records)
        .with_text_source(config.words.text_source)
        .report(config, &run);
    log::info!("{}", summary_line(&report));

    if args.json || args.output.is_some() {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| cli_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

        if let Some(ref out) = args.output {
            std::fs::write(out, &json_str).map_err(|e| {
                cli_err(EXIT_IO, format!("cannot write '{}': {e}", out.display()))
            })?;
            eprintln!("wrote {}", out.display());
        }
        if args.json {
            println!("{json_str}");
            return Ok(());
        }
    }

    let text = render_human(&report)
        .map_err(|e| cli_err(EXIT_ERROR, format!("cannot render report: {e}")))?;
    print!("{text}");
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    LexiconClassifier::from_config(&config.classifier)
        .map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))?;

    eprintln!(
        "valid: {} (limit {}, text source {}, {} stop words)",
        config_path.display(),
        config.words.limit,
        config.words.text_source,
        config.words.stop_words().len(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AnalyzeArgs {
        AnalyzeArgs::default()
    }

    #[test]
    fn negative_word_limit_clamps_to_zero() {
        let mut config = StatsConfig::default();
        apply_overrides(
            &mut config,
            &AnalyzeArgs {
                words: Some(-5),
                ..args()
            },
        )
        .unwrap();
        assert_eq!(config.words.limit, 0);
    }

    #[test]
    fn flags_override_config() {
        let mut config = StatsConfig::from_toml(
            "[words]\nlimit = 3\ntext_source = \"annotated\"\nextra_stop_words = [\"the\"]\n",
        )
        .unwrap();
        apply_overrides(
            &mut config,
            &AnalyzeArgs {
                words: Some(7),
                text_source: Some(TextSourceArg::Raw),
                stop_words: Some(vec!["a".into(), "an".into()]),
                ..args()
            },
        )
        .unwrap();
        assert_eq!(config.words.limit, 7);
        assert_eq!(config.words.text_source, TextSource::Raw);
        assert_eq!(config.words.stop_words().sorted(), vec!["a", "an"]);
    }

    #[test]
    fn blank_stop_word_flag_is_usage_error() {
        let mut config = StatsConfig::default();
        let err = apply_overrides(
            &mut config,
            &AnalyzeArgs {
                stop_words: Some(vec!["and".into(), "".into()]),
                ..args()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, EXIT_USAGE);
    }

    #[test]
    fn dataset_path_precedence() {
        let resolved = ResolvedConfig {
            config: StatsConfig::from_toml("[input]\nfile = \"data.csv\"\n").unwrap(),
            base_dir: PathBuf::from("/etc/prodsent"),
        };
        assert_eq!(
            dataset_path(&args(), &resolved),
            PathBuf::from("/etc/prodsent/data.csv")
        );
        let explicit = AnalyzeArgs {
            file: Some(PathBuf::from("mine.csv")),
            ..args()
        };
        assert_eq!(dataset_path(&explicit, &resolved), PathBuf::from("mine.csv"));

        let bare = ResolvedConfig {
            config: StatsConfig::default(),
            base_dir: PathBuf::from("."),
        };
        assert_eq!(dataset_path(&args(), &bare), PathBuf::from(DEFAULT_DATASET));
    }
}
