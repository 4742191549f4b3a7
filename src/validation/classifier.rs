/*!
 * QA classification of translated segments.
 *
 * Enriches the per-unit results of a translation run with row-local quality
 * signals and a final flagged verdict:
 *
 * `flagged = linguistic_untranslated || empty_target || ratio_flag`
 *
 * where `linguistic_untranslated` is the backend's "looks untranslated"
 * signal with identifiers, numbers and very short sources excluded.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::translation::orchestrator::SegmentResult;

use super::length::{length_ratio, LengthValidatorConfig};
use super::patterns::{is_non_linguistic, normalize_text};

/// Separator between reasons in `QaRow::reasons`
pub const REASON_SEPARATOR: &str = "; ";

/// A segment result widened with QA signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRow {
    pub unit_id: String,
    pub source_text: String,
    pub target_text: String,
    pub empty_source: bool,
    pub empty_target: bool,
    /// Normalized source differs from normalized target
    pub changed: bool,
    pub non_linguistic: bool,
    pub length_ratio: f64,
    pub ratio_flag: bool,
    /// "Looks untranslated" as reported by the translation run
    pub backend_flag: bool,
    pub linguistic_untranslated: bool,
    pub flagged: bool,
    /// Human readable, `; ` separated
    pub reasons: String,
}

/// Classifier over a full result set
#[derive(Debug, Clone, Default)]
pub struct QaClassifier {
    length: LengthValidatorConfig,
}

impl QaClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_length_config(length: LengthValidatorConfig) -> Self {
        Self { length }
    }

    /// Classify every result, keeping input order
    pub fn classify(&self, results: &[SegmentResult]) -> Vec<QaRow> {
        let rows: Vec<QaRow> = results.iter().map(|result| self.classify_row(result)).collect();
        debug!(
            "QA classified {} segments, {} flagged",
            rows.len(),
            rows.iter().filter(|row| row.flagged).count()
        );
        rows
    }

    fn classify_row(&self, result: &SegmentResult) -> QaRow {
        let source = result.source_text.as_str();
        let target = result.target_text.as_str();

        let empty_source = source.trim().is_empty();
        let empty_target = target.trim().is_empty();
        let changed = normalize_text(source) != normalize_text(target);
        let non_linguistic = is_non_linguistic(source);
        let ratio = length_ratio(source, target);
        let ratio_flag = self.length.is_suspicious(source, target);
        let backend_flag = result.flagged;
        let linguistic_untranslated = backend_flag && !non_linguistic;

        let mut reasons = Vec::new();
        if linguistic_untranslated {
            reasons.push("Looks untranslated".to_string());
        }
        if empty_source {
            reasons.push("Empty source".to_string());
        }
        if empty_target {
            reasons.push("Empty target".to_string());
        }
        if ratio_flag {
            reasons.push(format!("Length ratio {:.2}×", ratio));
        }

        QaRow {
            unit_id: result.unit_id.clone(),
            source_text: result.source_text.clone(),
            target_text: result.target_text.clone(),
            empty_source,
            empty_target,
            changed,
            non_linguistic,
            length_ratio: ratio,
            ratio_flag,
            backend_flag,
            linguistic_untranslated,
            flagged: linguistic_untranslated || empty_target || ratio_flag,
            reasons: reasons.join(REASON_SEPARATOR),
        }
    }
}
