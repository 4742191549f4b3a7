/*!
 * Translation of XLIFF documents.
 *
 * This module is split into several submodules:
 *
 * - `core`: the translation service, batching strings to a backend with retries and fallback
 * - `options`: options for a translation run
 * - `glossary`: literal replacements applied to translated text
 * - `reconstruct`: rebuilds a unit's target from its source markup
 * - `orchestrator`: translates whole documents in batches of units
 */

// Re-export main types for easier usage
pub use self::core::{retry_delay, BatchOutcome, TranslationService};
pub use self::glossary::Glossary;
pub use self::options::{BatchSettings, FallbackPolicy, TranslationOptions};
pub use self::orchestrator::{DocumentOutcome, DocumentTranslator, SegmentResult};
pub use self::reconstruct::rebuild_target;

// Submodules
pub mod core;
pub mod glossary;
pub mod options;
pub mod orchestrator;
pub mod reconstruct;
