/*!
 * XLIFF 1.2 document model.
 *
 * Wraps the parsed tree and knows where translation units, their sources and
 * targets, and the file-level attributes live.
 */

use log::debug;

use super::tree::{self, Element};
use crate::errors::XliffError;

/// XLIFF 1.2 namespace URI
pub const XLIFF_NS: &str = "urn:oasis:names:tc:xliff:document:1.2";

/// Local names used by the document model
pub const FILE_TAG: &str = "file";
pub const UNIT_TAG: &str = "trans-unit";
pub const SOURCE_TAG: &str = "source";
pub const TARGET_TAG: &str = "target";

/// Attribute holding the file-level target language
pub const TARGET_LANGUAGE_ATTR: &str = "target-language";

/// A translation unit located in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRef {
    /// Index path of the `trans-unit` element from the root
    pub path: Vec<usize>,
    /// Explicit `id` attribute, or `row-N` from the unit's 1-based position
    pub id: String,
}

/// A parsed XLIFF document, exclusively owned during a translation run
#[derive(Debug, Clone)]
pub struct XliffDocument {
    root: Element,
}

impl XliffDocument {
    /// Parse document bytes
    pub fn parse(bytes: &[u8]) -> Result<Self, XliffError> {
        let root = tree::parse(bytes)?;
        debug!("Parsed XLIFF document with root <{}>", root.name);
        Ok(Self { root })
    }

    /// Root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Translation units that own a `source`, in document order
    ///
    /// Units without a source are skipped but still count towards the
    /// positional fallback ids of the units after them.
    pub fn trans_units(&self) -> Vec<UnitRef> {
        self.root
            .descendant_paths(XLIFF_NS, UNIT_TAG)
            .into_iter()
            .enumerate()
            .filter_map(|(position, path)| {
                let unit = self.root.node_at(&path)?;
                unit.find_child(XLIFF_NS, SOURCE_TAG)?;
                let id = unit_id(unit, position);
                Some(UnitRef { path, id })
            })
            .collect()
    }

    /// Unit element at a path
    pub fn unit(&self, unit: &UnitRef) -> Option<&Element> {
        self.root.node_at(&unit.path)
    }

    /// Mutable unit element at a path
    pub fn unit_mut(&mut self, unit: &UnitRef) -> Option<&mut Element> {
        self.root.node_at_mut(&unit.path)
    }

    /// Overwrite the `target-language` attribute of the first `file` element
    ///
    /// Returns whether a `file` element was found.
    pub fn set_file_target_language(&mut self, language: &str) -> bool {
        match self
            .root
            .children
            .iter_mut()
            .find(|child| child.is(XLIFF_NS, FILE_TAG))
        {
            Some(file) => {
                file.set_attribute(TARGET_LANGUAGE_ATTR, language);
                true
            }
            None => false,
        }
    }

    /// `target-language` of the first `file` element
    pub fn file_target_language(&self) -> Option<&str> {
        self.root
            .find_child(XLIFF_NS, FILE_TAG)
            .and_then(|file| file.attribute(TARGET_LANGUAGE_ATTR))
    }

    /// Serialize with an XML declaration, UTF-8 encoded
    pub fn to_bytes(&self) -> Result<Vec<u8>, XliffError> {
        tree::to_bytes(&self.root)
    }
}

/// Id of a unit: its `id` attribute, else `row-N` with N the 1-based position
pub fn unit_id(unit: &Element, position: usize) -> String {
    match unit.attribute("id") {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("row-{}", position + 1),
    }
}

/// Visible text of an element: text content with whitespace collapsed
pub fn extract_visible_text(element: Option<&Element>) -> String {
    match element {
        Some(element) => collapse_whitespace(&element.text_content()),
        None => String::new(),
    }
}

/// Collapse whitespace runs to single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Source element of a unit
pub fn source_of(unit: &Element) -> Option<&Element> {
    unit.find_child(XLIFF_NS, SOURCE_TAG)
}

/// Target element of a unit
pub fn target_of(unit: &Element) -> Option<&Element> {
    unit.find_child(XLIFF_NS, TARGET_TAG)
}
