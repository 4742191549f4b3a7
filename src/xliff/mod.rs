/*!
 * XLIFF 1.2 handling.
 *
 * - `tree`: owned XML element tree with text/tail slots, parsing and writing
 * - `walker`: collection and write-back of translatable text runs
 * - `document`: translation unit discovery and file-level attributes
 */

pub mod document;
pub mod tree;
pub mod walker;

pub use self::document::{UnitRef, XliffDocument, XLIFF_NS};
pub use self::tree::Element;
pub use self::walker::{collect_text_runs, split_whitespace, TextRole, TextRun};
