// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, TranslationProvider};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod msg_processor;
mod providers;
mod translation;
mod verification;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    OpenAI,
    Anthropic,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
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

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate dialogue files using AI providers (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Estimate token usage and batch packing without calling the API
    Estimate(EstimateArgs),

    /// Generate shell completions for msgwai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input .msg file or directory containing .msg files
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output .msg file path or directory to write translated file(s) to
    #[arg(value_name = "OUTPUT_PATH")]
    output_path: PathBuf,

    /// API key for the translation provider
    #[arg(short = 'k', long, env = "MSGWAI_API_KEY")]
    api_key: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Sampling temperature (0.0 to 2.0)
    #[arg(short, long)]
    temperature: Option<f32>,

    /// Number of files translated concurrently
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// Character encoding of the source files (e.g. 'windows-1251', 'utf-8')
    #[arg(short = 'e', long)]
    source_encoding: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct EstimateArgs {
    /// Input .msg file or directory containing .msg files
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Token ceiling per planned batch
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Character encoding of the source files
    #[arg(short = 'e', long)]
    source_encoding: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// msgwai - MSG Translation With AI
///
/// Translates game-dialogue .msg files (format {id}{speaker}{text}) using
/// chat-style AI providers, with structural verification of the output.
#[derive(Parser, Debug)]
#[command(name = "msgwai")]
#[command(author = "msgwai Team")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered translator for game-dialogue .msg files")]
#[command(long_about = "msgwai sends game-dialogue .msg files to an AI translation API and writes
back translated files, verifying that line counts and record ids survived.

EXAMPLES:
    msgwai dialog.msg out/                       # Translate one file into a directory
    msgwai text/ out/                            # Translate every .msg file in a directory
    msgwai -p openai -m gpt-4 text/ out/         # Use a specific provider and model
    msgwai -t 0.8 -j 8 text/ out/                # Higher temperature, 8 parallel files
    msgwai -e utf-8 text/ out/                   # Source files already in UTF-8
    msgwai estimate text/                        # Token and batch estimate, no API calls
    msgwai completions bash > msgwai.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

SUPPORTED PROVIDERS:
    openai    - OpenAI API (default, requires API key)
    anthropic - Anthropic Claude API (requires API key)
    mock      - In-process echo provider (tests and offline runs)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .msg file or directory containing .msg files
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output .msg file path or directory to write translated file(s) to
    #[arg(value_name = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    /// API key for the translation provider
    #[arg(short = 'k', long, env = "MSGWAI_API_KEY")]
    api_key: Option<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Sampling temperature (0.0 to 2.0)
    #[arg(short, long)]
    temperature: Option<f32>,

    /// Number of files translated concurrently
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// Character encoding of the source files (e.g. 'windows-1251', 'utf-8')
    #[arg(short = 'e', long)]
    source_encoding: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "msgwai", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        Some(Commands::Estimate(args)) => run_estimate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;
            let output_path = cli.output_path.ok_or_else(|| {
                anyhow!("OUTPUT_PATH is required when no subcommand is specified")
            })?;

            let translate_args = TranslateArgs {
                input_path,
                output_path,
                api_key: cli.api_key,
                provider: cli.provider,
                model: cli.model,
                temperature: cli.temperature,
                concurrency: cli.concurrency,
                source_encoding: cli.source_encoding,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

/// Load the configuration file, creating a default one when missing
fn load_config(config_path: &str, cmd_log_level: &Option<CliLogLevel>) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = cmd_log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, &options.log_level)?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }

    if let Some(api_key) = &options.api_key {
        config.translation.api_key = api_key.clone();
    }

    if let Some(temperature) = options.temperature {
        config.translation.common.temperature = temperature;
    }

    if let Some(concurrency) = options.concurrency {
        config.translation.concurrent_files = concurrency;
    }

    if let Some(source_encoding) = &options.source_encoding {
        config.source_encoding = source_encoding.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;
    controller.run(options.input_path, options.output_path).await
}

async fn run_estimate(options: EstimateArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, &options.log_level)?;

    if let Some(max_tokens) = options.max_tokens {
        config.translation.max_tokens_per_batch = max_tokens;
    }

    if let Some(source_encoding) = &options.source_encoding {
        config.source_encoding = source_encoding.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Estimate mode never talks to the API, so an absent key is fine here;
    // only the encoding and batch settings matter
    if encoding_rs::Encoding::for_label(config.source_encoding.as_bytes()).is_none() {
        return Err(anyhow!("Unknown source encoding: {}", config.source_encoding));
    }

    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;
    controller.estimate(options.input_path).await
}
