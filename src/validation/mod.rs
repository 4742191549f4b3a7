/*!
 * Quality assurance for translated XLIFF segments.
 *
 * - `patterns`: detects identifiers, tokens and numbers that need no translation
 * - `length`: length ratio checks between source and target
 * - `classifier`: combines the signals into a per-segment verdict
 */

pub mod classifier;
pub mod length;
pub mod patterns;

// Re-export main types
pub use classifier::{QaClassifier, QaRow};
pub use length::{is_ratio_suspicious, length_ratio, LengthValidatorConfig};
pub use patterns::{is_non_linguistic, looks_like_id_or_token, looks_like_numberish, normalize_text};
