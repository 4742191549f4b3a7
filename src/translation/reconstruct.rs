/*!
 * Target reconstruction.
 *
 * Builds a unit's `target` as a structural copy of its `source`, with each
 * translatable run replaced by its decorated translation, and splices it in
 * right after the source.
 */

use crate::errors::TranslationError;
use crate::xliff::document::{SOURCE_TAG, TARGET_TAG, XLIFF_NS};
use crate::xliff::walker::{collect_text_runs, set_run_text};
use crate::xliff::Element;

use super::options::TranslationOptions;

/// Replace the unit's target with a translated copy of its source
///
/// `translations` holds one translated core per run of the source, in walk
/// order. `unit_id` names the unit in errors. A unit without a source is left
/// untouched.
pub fn rebuild_target(
    unit: &mut Element,
    unit_id: &str,
    translations: &[String],
    options: &TranslationOptions,
) -> Result<(), TranslationError> {
    let Some(source) = unit.find_child(XLIFF_NS, SOURCE_TAG) else {
        return Ok(());
    };

    let mut target = source.clone();
    target.rename_local(TARGET_TAG);

    let runs = collect_text_runs(&target);
    if runs.len() != translations.len() {
        return Err(TranslationError::RunCountMismatch {
            unit_id: unit_id.to_string(),
            expected: runs.len(),
            actual: translations.len(),
        });
    }

    for (run, translated) in runs.iter().zip(translations) {
        let decorated = options.decorate(translated);
        set_run_text(&mut target, run, run.reassemble(&decorated));
    }

    unit.children.retain(|child| !child.is(XLIFF_NS, TARGET_TAG));

    // Position is looked up after removal, an old target may have preceded the source
    let insert_at = unit
        .child_position(XLIFF_NS, SOURCE_TAG)
        .map_or(unit.children.len(), |index| index + 1);
    unit.children.insert(insert_at, target);

    Ok(())
}
