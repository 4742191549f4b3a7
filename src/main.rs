// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use xliff_translator::app_config::{self, Config, TranslationProvider};
use xliff_translator::app_controller::Controller;
use xliff_translator::report::{ReportView, ReviewFilter};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    GoogleCloud,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::GoogleCloud => TranslationProvider::GoogleCloud,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate XLIFF files (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for xliff-translator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input XLIFF file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// API key for providers that need one
    #[arg(long, env = "GOOGLE_TRANSLATE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Source language code (e.g., 'en'), 'auto' to detect
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'fr', 'de')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Value for the file-level target-language attribute (e.g., 'fr-fr')
    #[arg(long)]
    file_target_language: Option<String>,

    /// Number of translation units per batch
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// List QA rows of this view after each file (changed, flagged, all, unchanged)
    #[arg(long, value_name = "VIEW")]
    view: Option<ReportView>,

    /// Only list QA rows whose source, target or reasons contain this text
    #[arg(long, value_name = "TEXT")]
    search: Option<String>,
}

/// xliff-translator - XLIFF 1.2 translation with QA report
///
/// Translates every trans-unit of XLIFF 1.2 files while keeping inline markup
/// intact, then flags segments that look untranslated or suspicious.
#[derive(Parser, Debug)]
#[command(name = "xliff-translator")]
#[command(version)]
#[command(about = "Markup-preserving XLIFF 1.2 translator with QA report")]
#[command(long_about = "xliff-translator fills the <target> of every trans-unit with a translation of its <source>, keeping inline tags and whitespace, and writes a QA report next to the output.

EXAMPLES:
    xliff-translator strings.xlf                      # Translate using default config
    xliff-translator -f strings.xlf                   # Force overwrite existing files
    xliff-translator -s en -t de strings.xlf          # Translate from English to German
    xliff-translator -p google-cloud strings.xlf      # Use the Cloud Translation API
    xliff-translator --log-level debug ./locales/     # Process entire directory with debug logging
    xliff-translator --view flagged strings.xlf       # List flagged segments after the run
    xliff-translator --search cart strings.xlf        # List segments mentioning 'cart'
    xliff-translator completions bash > xliff.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

OUTPUT:
    <stem>.<lang>.xlf      translated document
    <stem>.<lang>.qa.json  QA report")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input XLIFF file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// API key for providers that need one
    #[arg(long, env = "GOOGLE_TRANSLATE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Source language code (e.g., 'en'), 'auto' to detect
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'fr', 'de')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Value for the file-level target-language attribute (e.g., 'fr-fr')
    #[arg(long)]
    file_target_language: Option<String>,

    /// Number of translation units per batch
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// List QA rows of this view after each file (changed, flagged, all, unchanged)
    #[arg(long, value_name = "VIEW")]
    view: Option<ReportView>,

    /// Only list QA rows whose source, target or reasons contain this text
    #[arg(long, value_name = "TEXT")]
    search: Option<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", ""),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                colour,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Level is refined once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "xliff-translator", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            run_translate(TranslateArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                provider: cli.provider,
                api_key: cli.api_key,
                source_language: cli.source_language,
                target_language: cli.target_language,
                file_target_language: cli.file_target_language,
                batch_size: cli.batch_size,
                output_dir: cli.output_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
                view: cli.view,
                search: cli.search,
            })
            .await
        }
    }
}

/// Apply command line overrides on top of the file configuration
fn apply_overrides(config: &mut Config, options: &TranslateArgs) {
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(api_key) = &options.api_key {
        config.translation.api_key = api_key.clone();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(file_target_language) = &options.file_target_language {
        config.file_target_language = Some(file_target_language.clone());
    }
    if let Some(batch_size) = options.batch_size {
        config.translation.common.batch_size = batch_size;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}

/// Review filter from `--view`/`--search`; a search alone looks at every row
fn review_filter(options: &TranslateArgs) -> Option<ReviewFilter> {
    match (options.view, options.search.as_deref()) {
        (None, None) => None,
        (view, search) => Some(ReviewFilter::new(
            view.unwrap_or(ReportView::All),
            search.unwrap_or_default(),
        )),
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(Path::new(&options.config_path))?;
    apply_overrides(&mut config, &options);

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    info!(
        "xliff-translator: {} ({} -> {})",
        config.translation.provider.display_name(),
        if config.source_language.is_empty() { "auto" } else { &config.source_language },
        config.target_language
    );

    let mut controller = Controller::with_config(config)?;
    if let Some(review) = review_filter(&options) {
        controller = controller.with_review(review);
    }

    if options.input_path.is_file() {
        let output_dir = match &options.output_dir {
            Some(dir) => dir.clone(),
            None => options
                .input_path
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf(),
        };
        controller
            .run(options.input_path.clone(), output_dir, options.force_overwrite)
            .await?;
    } else if options.input_path.is_dir() {
        let summary = controller
            .run_folder(options.input_path.clone(), options.force_overwrite)
            .await?;
        if summary.errors > 0 {
            return Err(anyhow!("{} file(s) failed to translate", summary.errors));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
