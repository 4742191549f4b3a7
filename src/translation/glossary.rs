/*!
 * Glossary substitution for translated text.
 */

use std::collections::BTreeMap;

/// Literal replacements applied longest key first
///
/// Longer keys win over keys they contain, so "Digital Academy" is replaced
/// before "Academy". Keys of equal length are applied in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    entries: Vec<(String, String)>,
}

impl Glossary {
    /// Build a glossary from key/value pairs; empty keys are ignored
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (key, value) in pairs {
            let key = key.into();
            if !key.is_empty() {
                map.insert(key, value.into());
            }
        }
        Self::from_map(&map)
    }

    /// Build a glossary from a configuration map
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut entries: Vec<(String, String)> = map
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        // Stable sort keeps lexicographic order between keys of equal length
        entries.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in application order
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Replace every key occurrence with its value, longest key first
    pub fn apply(&self, text: &str) -> String {
        self.entries
            .iter()
            .fold(text.to_string(), |out, (key, value)| out.replace(key.as_str(), value))
    }
}
