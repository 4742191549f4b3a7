/*!
 * Document-level translation.
 *
 * Walks every translation unit of an XLIFF document, sends the text runs of
 * consecutive units to the translation service in batches, rebuilds each
 * unit's target and reports one `SegmentResult` per processed unit.
 *
 * The progress callback runs synchronously between batches; a slow callback
 * delays the next batch and an error from it stops the run before the
 * document is serialized.
 */

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{TranslationError, XliffError};
use crate::xliff::document::{collapse_whitespace, extract_visible_text, source_of, target_of};
use crate::xliff::walker::collect_text_runs;
use crate::xliff::{UnitRef, XliffDocument};

use super::core::TranslationService;
use super::options::{BatchSettings, TranslationOptions};
use super::reconstruct::rebuild_target;

/// Reason recorded when source and target read the same
pub const LOOKS_UNTRANSLATED: &str = "Looks untranslated";

/// Per-unit outcome of a translation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentResult {
    pub unit_id: String,
    /// Visible source text, whitespace collapsed
    pub source_text: String,
    /// Visible target text, whitespace collapsed
    pub target_text: String,
    pub flagged: bool,
    pub flag_reasons: Vec<String>,
}

/// Output of a document translation
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    /// Serialized document
    pub bytes: Vec<u8>,
    /// One result per processed unit, in document order
    pub results: Vec<SegmentResult>,
    /// Runs resolved through the fallback policy across the whole document
    pub failed_runs: usize,
}

/// Whether source and target read the same once whitespace and case are ignored
pub fn looks_untranslated(source: &str, target: &str) -> bool {
    let source = collapse_whitespace(source).to_lowercase();
    let target = collapse_whitespace(target).to_lowercase();
    !source.is_empty() && !target.is_empty() && source == target
}

/// Translates whole XLIFF documents
pub struct DocumentTranslator<'a> {
    service: &'a TranslationService,
    options: &'a TranslationOptions,
    settings: BatchSettings,
}

struct PendingUnit<'u> {
    unit: &'u UnitRef,
    run_count: usize,
}

impl<'a> DocumentTranslator<'a> {
    pub fn new(
        service: &'a TranslationService,
        options: &'a TranslationOptions,
        settings: BatchSettings,
    ) -> Self {
        Self {
            service,
            options,
            settings,
        }
    }

    /// Translate a document without progress reporting
    pub async fn translate_document(&self, bytes: &[u8]) -> Result<DocumentOutcome, TranslationError> {
        self.translate_document_with_progress(bytes, |_, _| Ok(()))
            .await
    }

    /// Translate a document, calling `progress(completed_units, total_units)` after each batch
    pub async fn translate_document_with_progress<F>(
        &self,
        bytes: &[u8],
        mut progress: F,
    ) -> Result<DocumentOutcome, TranslationError>
    where
        F: FnMut(usize, usize) -> anyhow::Result<()>,
    {
        let mut document = XliffDocument::parse(bytes)?;
        let units = document.trans_units();
        let total_units = units.len();
        let batch_size = self.settings.batch_size.max(1);

        info!(
            "Translating {} units in batches of {} with {}",
            total_units,
            batch_size,
            self.service.provider_name()
        );

        let mut results = Vec::with_capacity(total_units);
        let mut failed_runs = 0;
        let mut completed = 0;

        for batch in units.chunks(batch_size) {
            let mut texts = Vec::new();
            let mut pending = Vec::with_capacity(batch.len());

            for unit in batch {
                let runs = document
                    .unit(unit)
                    .and_then(source_of)
                    .map(collect_text_runs)
                    .unwrap_or_default();
                pending.push(PendingUnit {
                    unit,
                    run_count: runs.len(),
                });
                texts.extend(runs.into_iter().map(|run| run.core));
            }

            let outcome = self.service.translate_batch(&texts, self.options).await?;
            failed_runs += outcome.failed_count;

            let mut offset = 0;
            for PendingUnit { unit, run_count } in pending {
                let slice = &outcome.translations[offset..offset + run_count];
                offset += run_count;
                results.push(self.finish_unit(&mut document, unit, slice)?);
            }

            completed += batch.len();
            debug!("Processed {}/{} units", completed, total_units);
            progress(completed, total_units)
                .map_err(|e| TranslationError::Aborted(e.to_string()))?;

            if !self.settings.batch_delay.is_zero() {
                tokio::time::sleep(self.settings.batch_delay).await;
            }
        }

        if failed_runs > 0 {
            warn!("{} text runs fell back to the source text", failed_runs);
        }

        if let Some(language) = self
            .options
            .file_target_language
            .as_deref()
            .filter(|l| !l.is_empty())
        {
            if !document.set_file_target_language(language) {
                warn!("No <file> element found, target-language not set");
            }
        }

        Ok(DocumentOutcome {
            bytes: document.to_bytes()?,
            results,
            failed_runs,
        })
    }

    fn finish_unit(
        &self,
        document: &mut XliffDocument,
        unit: &UnitRef,
        translations: &[String],
    ) -> Result<SegmentResult, TranslationError> {
        let element = document
            .unit_mut(unit)
            .ok_or_else(|| XliffError::Malformed(format!("unit '{}' disappeared", unit.id)))?;

        rebuild_target(element, &unit.id, translations, self.options)?;

        let source_text = extract_visible_text(source_of(element));
        let target_text = extract_visible_text(target_of(element));

        let mut flag_reasons = Vec::new();
        if looks_untranslated(&source_text, &target_text) {
            flag_reasons.push(LOOKS_UNTRANSLATED.to_string());
        }

        Ok(SegmentResult {
            unit_id: unit.id.clone(),
            source_text,
            target_text,
            flagged: !flag_reasons.is_empty(),
            flag_reasons,
        })
    }
}
