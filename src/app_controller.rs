use anyhow::{anyhow, Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::report::{sample_changed, QaReport, QaSummary, ReviewFilter};
use crate::translation::{DocumentTranslator, TranslationService};
use crate::validation::{QaClassifier, QaRow};

// @module: Application controller for XLIFF translation

/// Rows of translated sample logged at debug level after each file
const SAMPLE_SIZE: usize = 5;

/// Outcome of translating one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub output_path: PathBuf,
    pub report_path: PathBuf,
    pub summary: QaSummary,
    /// Text runs that fell back to the source text
    pub failed_runs: usize,
    /// Rows selected by the review filter, empty without one
    pub review_rows: Vec<QaRow>,
}

/// Counters for a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Main application controller for XLIFF translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translation backend
    service: TranslationService,
    // @field: Rows to list after each file
    review: Option<ReviewFilter>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(&config.translation)
            .context("Failed to create translation service")?;
        Ok(Self {
            config,
            service,
            review: None,
        })
    }

    /// Create a controller around an existing translation service
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self {
            config,
            service,
            review: None,
        }
    }

    /// List the rows matching `review` after each translated file
    pub fn with_review(mut self, review: ReviewFilter) -> Self {
        self.review = Some(review);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate one file into `output_dir`
    ///
    /// Returns `None` when both the output and its report already exist and
    /// `force_overwrite` is not set.
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<Option<FileReport>> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        self.check_connection().await;
        let multi_progress = MultiProgress::new();
        self.run_with_progress(&input_file, &output_dir, &multi_progress, force_overwrite)
            .await
    }

    /// Translate every XLIFF file under `input_dir`, writing outputs next to each input
    ///
    /// A failing file is logged and the run continues with the next one.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let output_suffix = format!(".{}", self.config.target_language);
        let files: Vec<PathBuf> = FileManager::find_xliff_files(&input_dir)?
            .into_iter()
            .filter(|path| !Self::is_translated_output(path, &output_suffix))
            .collect();

        if files.is_empty() {
            return Err(anyhow!("No XLIFF files found in directory: {:?}", input_dir));
        }

        self.check_connection().await;

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
        folder_pb.set_style(Self::progress_style("files"));
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();

        for file in &files {
            let file_name = file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = file
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| input_dir.clone());

            match self
                .run_with_progress(file, &output_dir, &multi_progress, force_overwrite)
                .await
            {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.errors += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed in {}: {} processed, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            summary.processed,
            summary.skipped,
            summary.errors
        );

        Ok(summary)
    }

    async fn run_with_progress(
        &self,
        input_file: &Path,
        output_dir: &Path,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<Option<FileReport>> {
        let start_time = Instant::now();
        let target_language = &self.config.target_language;

        FileManager::ensure_dir(output_dir)?;

        let output_path = FileManager::translated_path(input_file, output_dir, target_language);
        let report_path = FileManager::report_path(input_file, output_dir, target_language);
        if output_path.exists() && report_path.exists() && !force_overwrite {
            warn!(
                "Skipping {:?}, translation already exists (use -f to force overwrite)",
                input_file
            );
            return Ok(None);
        }

        let input = FileManager::read_bytes(input_file)?;
        info!(
            "Translating {} ({} bytes) from {} to {}",
            input_file.display(),
            input.len(),
            self.source_language_label(),
            target_language
        );

        let options = self.config.translation_options();
        let translator =
            DocumentTranslator::new(&self.service, &options, self.config.batch_settings());

        let progress_bar = multi_progress.add(ProgressBar::new(0));
        progress_bar.set_style(Self::progress_style("units"));
        progress_bar.set_message("Translating");

        let pb = progress_bar.clone();
        let outcome = translator
            .translate_document_with_progress(&input, move |completed, total| {
                pb.set_length(total as u64);
                pb.set_position(completed as u64);
                Ok(())
            })
            .await;
        progress_bar.finish_and_clear();
        let outcome =
            outcome.with_context(|| format!("Failed to translate {}", input_file.display()))?;

        let rows = QaClassifier::new().classify(&outcome.results);
        for row in sample_changed(&rows, SAMPLE_SIZE) {
            log::debug!("[{}] {} => {}", row.unit_id, row.source_text, row.target_text);
        }

        let report = QaReport::new(
            input_file,
            &output_path,
            self.source_language_label(),
            target_language,
            self.service.provider_name(),
            outcome.failed_runs,
            rows,
        );

        let report_json = report.to_json()?;
        FileManager::write_bytes(&output_path, &outcome.bytes)?;
        if let Err(e) = FileManager::write_to_file(&report_path, &report_json) {
            // A failed run leaves no output behind
            if let Err(remove_error) = std::fs::remove_file(&output_path) {
                warn!("Failed to remove {:?}: {}", output_path, remove_error);
            }
            return Err(e);
        }

        let review_rows = self.log_review(&report.rows);

        if report.summary.flagged > 0 {
            warn!("{} segments flagged for review, see {}", report.summary.flagged, report_path.display());
        }
        info!(
            "Success: {} ({}) in {}",
            output_path.display(),
            report.summary,
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(FileReport {
            output_path,
            report_path,
            summary: report.summary,
            failed_runs: outcome.failed_runs,
            review_rows,
        }))
    }

    fn log_review(&self, rows: &[QaRow]) -> Vec<QaRow> {
        let Some(review) = &self.review else {
            return Vec::new();
        };

        let matching = review.apply(rows);
        if review.query.trim().is_empty() {
            info!("{} {} segments", matching.len(), review.view);
        } else {
            info!(
                "{} {} segments matching '{}'",
                matching.len(),
                review.view,
                review.query.trim()
            );
        }
        for row in &matching {
            if row.reasons.is_empty() {
                info!("[{}] {} => {}", row.unit_id, row.source_text, row.target_text);
            } else {
                info!(
                    "[{}] {} => {} ({})",
                    row.unit_id, row.source_text, row.target_text, row.reasons
                );
            }
        }

        matching.into_iter().cloned().collect()
    }

    // Connection problems only warn, each string still has its own retries and fallback
    async fn check_connection(&self) {
        if let Err(e) = self.service.test_connection().await {
            warn!(
                "Connection test to {} failed: {}",
                self.service.provider_name(),
                e
            );
        }
    }

    fn source_language_label(&self) -> &str {
        if crate::language_utils::is_auto(&self.config.source_language) {
            "auto"
        } else {
            &self.config.source_language
        }
    }

    // Outputs of a previous run sit next to their inputs in folder mode
    fn is_translated_output(path: &Path, output_suffix: &str) -> bool {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().ends_with(output_suffix))
            .unwrap_or(false)
    }

    fn progress_style(unit: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}} {{eta}}",
                unit
            ))
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: Duration) -> String {
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
