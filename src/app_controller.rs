use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;
use parking_lot::Mutex;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::{AppError, VerificationError};
use crate::file_utils::FileManager;
use crate::msg_processor;
use crate::translation::{BatchPlanner, TiktokenCounter, TokenCounter, TokenUsageStats, TranslationService};
use crate::verification::verify_structure;

// @module: Application controller for dialogue file translation

/// Outcome of processing one input file
enum FileOutcome {
    /// Translated, written, and structurally verified
    Clean(PathBuf),

    /// Translated and written, but the structural check failed
    Suspect(PathBuf, VerificationError),
}

/// Main application controller for dialogue file translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the main workflow: translate every input file into the output location
    pub async fn run(&self, input: PathBuf, output: PathBuf) -> Result<()> {
        let service = Arc::new(TranslationService::new(self.config.translation.clone())?);
        self.run_with_service(input, output, service).await
    }

    /// Run the main workflow against an already-built translation service.
    ///
    /// Split out from [`Controller::run`] so tests can inject a scripted
    /// provider without touching the network.
    pub async fn run_with_service(
        &self,
        input: PathBuf,
        output: PathBuf,
        service: Arc<TranslationService>,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        let input_files = Self::collect_input_files(&input)?;

        // Fatal before any work begins: several inputs cannot share one output file
        if input_files.len() > 1 && FileManager::is_msg_path(&output) {
            return Err(AppError::Config(format!(
                "{} input files but a single output file {:?} provided",
                input_files.len(),
                output
            ))
            .into());
        }

        if !FileManager::is_msg_path(&output) {
            FileManager::ensure_dir(&output)?;
        }

        info!("🚀 msgwai: {} - {}",
            self.config.translation.provider.display_name(),
            self.config.translation.get_model());
        info!("Translating {} file(s), please wait…", input_files.len());

        let progress_bar = ProgressBar::new(input_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let concurrency = self.config.translation.concurrent_files;
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let token_stats = Arc::new(Mutex::new(TokenUsageStats::with_provider_info(
            self.config.translation.provider.to_string(),
            self.config.translation.get_model(),
        )));

        // Each worker runs the full read -> translate -> write -> verify
        // sequence for one file; files are fully independent and a failure
        // never affects siblings.
        let results = stream::iter(input_files)
            .map(|input_file| {
                let service = service.clone();
                let semaphore = semaphore.clone();
                let token_stats = token_stats.clone();
                let progress_bar = progress_bar.clone();
                let output = output.clone();
                let source_encoding = self.config.source_encoding.clone();
                let temperature = self.config.translation.common.temperature;

                async move {
                    let _permit = semaphore.acquire().await.unwrap();

                    let outcome = Self::process_file(
                        &input_file,
                        &output,
                        &source_encoding,
                        temperature,
                        &service,
                        &token_stats,
                    )
                    .await;

                    progress_bar.inc(1);
                    (input_file, outcome)
                }
            })
            .buffer_unordered(concurrency)
            .collect::<Vec<_>>()
            .await;

        progress_bar.finish_and_clear();

        let mut clean_count = 0;
        let mut suspect_count = 0;
        let mut error_count = 0;

        for (input_file, outcome) in results {
            match outcome {
                Ok(FileOutcome::Clean(output_path)) => {
                    clean_count += 1;
                    info!("Success: {}", output_path.display());
                }
                Ok(FileOutcome::Suspect(output_path, verdict)) => {
                    suspect_count += 1;
                    warn!(
                        "Verification failed for {:?} ({}); suspect output written to {}",
                        input_file,
                        verdict,
                        output_path.display()
                    );
                }
                Err(e) => {
                    error_count += 1;
                    error!("Error processing file {:?}: {}", input_file, e);
                }
            }
        }

        info!(
            "Translation completed in {}: {} translated, {} suspect, {} errors",
            Self::format_duration(start_time.elapsed()),
            clean_count,
            suspect_count,
            error_count
        );

        let stats = token_stats.lock();
        if stats.total_tokens > 0 {
            info!("🔢 {}", stats.summary());
        }

        Ok(())
    }

    /// Estimate mode: pack the inputs into token-budget batches and report
    /// projected token totals without calling the API
    pub async fn estimate(&self, input: PathBuf) -> Result<()> {
        let input_files = Self::collect_input_files(&input)?;

        let mut payloads = Vec::with_capacity(input_files.len());
        for input_file in &input_files {
            let content =
                FileManager::read_with_encoding(input_file, &self.config.source_encoding)?;
            payloads.push((input_file.clone(), msg_processor::extract_payloads(&content)));
        }

        let counter = TiktokenCounter::new()?;
        let prompt_tokens = counter.count(&self.config.translation.common.system_prompt);
        let planner = BatchPlanner::new(prompt_tokens, self.config.translation.max_tokens_per_batch);
        let batches = planner.plan(&payloads, &counter);

        info!(
            "Planned {} batch(es) for {} file(s), prompt cost {} tokens, ceiling {} tokens",
            batches.len(),
            input_files.len(),
            prompt_tokens,
            self.config.translation.max_tokens_per_batch
        );

        let mut total_tokens = 0;
        for (index, batch) in batches.iter().enumerate() {
            total_tokens += batch.estimated_tokens;
            info!(
                "Batch {}: {} file(s), ~{} tokens",
                index + 1,
                batch.files.len(),
                batch.estimated_tokens
            );
            for file in &batch.files {
                debug!("  {}", file.display());
            }
        }

        info!("Estimated total: ~{} tokens", total_tokens);

        Ok(())
    }

    /// Process a single file: read, translate, write, verify.
    ///
    /// Verification is advisory - the output file is written before the
    /// structural check runs, and a failed check only marks it suspect.
    async fn process_file(
        input_file: &Path,
        output: &Path,
        source_encoding: &str,
        temperature: f32,
        service: &TranslationService,
        token_stats: &Mutex<TokenUsageStats>,
    ) -> Result<FileOutcome> {
        let content = FileManager::read_with_encoding(input_file, source_encoding)?;

        debug!("Translating {:?}…", input_file);
        let (translated, usage) = service
            .translate_file(&content)
            .await
            .with_context(|| format!("Translation failed for {:?}", input_file))?;

        token_stats.lock().record(&usage);

        let output_path = FileManager::resolve_output_path(
            input_file,
            output,
            &service.config.get_model(),
            temperature,
        );
        FileManager::write_utf8(&output_path, &translated)?;

        match verify_structure(&content, &translated) {
            Ok(()) => Ok(FileOutcome::Clean(output_path)),
            Err(verdict) => Ok(FileOutcome::Suspect(output_path, verdict)),
        }
    }

    /// Collect the `.msg` files named by the input argument
    fn collect_input_files(input: &Path) -> Result<Vec<PathBuf>> {
        if input.is_file() {
            if !FileManager::is_msg_path(input) {
                return Err(AppError::Config(format!(
                    "Input file is not a .msg file: {:?}",
                    input
                ))
                .into());
            }
            return Ok(vec![input.to_path_buf()]);
        }

        if input.is_dir() {
            let files = FileManager::find_msg_files(input)?;
            if files.is_empty() {
                return Err(AppError::Config(format!(
                    "No .msg files found in directory: {:?}",
                    input
                ))
                .into());
            }
            return Ok(files);
        }

        Err(AppError::File(format!("Input path does not exist: {:?}", input)).into())
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
