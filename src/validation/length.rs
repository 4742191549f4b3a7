/*!
 * Length validation for translated segments.
 *
 * A translation far shorter or longer than its source often means a
 * truncated or duplicated segment. The ratio is only meaningful once both
 * texts are long enough, short strings are exempt.
 */

/// Minimum acceptable length ratio (target / source)
pub const MIN_LENGTH_RATIO: f64 = 0.45;

/// Maximum acceptable length ratio (target / source)
pub const MAX_LENGTH_RATIO: f64 = 2.2;

/// Minimum length, in characters, of both texts before the ratio is checked
pub const MIN_LENGTH_FOR_RATIO: usize = 12;

/// Configuration for length validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthValidatorConfig {
    pub min_ratio: f64,
    pub max_ratio: f64,
    /// Source and target must both reach this length for a ratio check
    pub min_length_for_ratio: usize,
}

impl Default for LengthValidatorConfig {
    fn default() -> Self {
        Self {
            min_ratio: MIN_LENGTH_RATIO,
            max_ratio: MAX_LENGTH_RATIO,
            min_length_for_ratio: MIN_LENGTH_FOR_RATIO,
        }
    }
}

/// Length of a text in characters
fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Target length over source length, the source counting as at least one character
pub fn length_ratio(source: &str, target: &str) -> f64 {
    char_len(target) as f64 / char_len(source).max(1) as f64
}

/// Whether the ratio between source and target is out of bounds
pub fn is_ratio_suspicious(source: &str, target: &str) -> bool {
    LengthValidatorConfig::default().is_suspicious(source, target)
}

impl LengthValidatorConfig {
    /// Whether the ratio between source and target is out of these bounds
    pub fn is_suspicious(&self, source: &str, target: &str) -> bool {
        let source_len = char_len(source).max(1);
        let target_len = char_len(target);
        if source_len < self.min_length_for_ratio || target_len < self.min_length_for_ratio {
            return false;
        }

        let ratio = length_ratio(source, target);
        ratio < self.min_ratio || ratio > self.max_ratio
    }
}
