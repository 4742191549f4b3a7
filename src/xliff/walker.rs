/*!
 * Text-run walker.
 *
 * Collects every translatable text run of an element subtree together with
 * the information needed to write a replacement back into the same slot.
 * Runs are addressed by index paths so that the walk over a source subtree
 * can be replayed against a structural clone.
 */

use super::tree::Element;

/// Which text slot of a node a run lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// Text inside the node, before its first child
    Primary,
    /// Text after the node's closing tag
    Tail,
}

/// A translatable run of text, split into whitespace and core content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    /// Index path of the owning node, relative to the walked root
    pub path: Vec<usize>,
    /// Slot the run occupies in the owning node
    pub role: TextRole,
    /// Whitespace before the core, kept verbatim
    pub leading: String,
    /// Content sent for translation
    pub core: String,
    /// Whitespace after the core, kept verbatim
    pub trailing: String,
}

impl TextRun {
    /// Rebuild the full slot value around a new core
    pub fn reassemble(&self, core: &str) -> String {
        format!("{}{}{}", self.leading, core, self.trailing)
    }
}

/// Split a string into leading whitespace, core and trailing whitespace
pub fn split_whitespace(text: &str) -> (&str, &str, &str) {
    let without_leading = text.trim_start();
    let leading = &text[..text.len() - without_leading.len()];
    let core = without_leading.trim_end();
    let trailing = &without_leading[core.len()..];
    (leading, core, trailing)
}

/// Collect the translatable runs of a subtree
///
/// Order: the root's primary text, then for each child in document order its
/// primary text, its tail text, then the runs of the child's own descendants.
/// Runs whose core is empty are skipped.
pub fn collect_text_runs(root: &Element) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut path = Vec::new();

    push_run(&mut runs, &path, TextRole::Primary, root.text.as_deref());
    collect_children(root, &mut path, &mut runs);

    runs
}

fn collect_children(node: &Element, path: &mut Vec<usize>, runs: &mut Vec<TextRun>) {
    for (index, child) in node.children.iter().enumerate() {
        path.push(index);
        push_run(runs, path, TextRole::Primary, child.text.as_deref());
        push_run(runs, path, TextRole::Tail, child.tail.as_deref());
        collect_children(child, path, runs);
        path.pop();
    }
}

fn push_run(runs: &mut Vec<TextRun>, path: &[usize], role: TextRole, text: Option<&str>) {
    let Some(text) = text else {
        return;
    };
    let (leading, core, trailing) = split_whitespace(text);
    if core.is_empty() {
        return;
    }
    runs.push(TextRun {
        path: path.to_vec(),
        role,
        leading: leading.to_string(),
        core: core.to_string(),
        trailing: trailing.to_string(),
    });
}

/// Write a value into the slot a run was collected from
///
/// Returns `false` when the run's path does not exist under `root`.
pub fn set_run_text(root: &mut Element, run: &TextRun, value: String) -> bool {
    let Some(node) = root.node_at_mut(&run.path) else {
        return false;
    };
    match run.role {
        TextRole::Primary => node.text = Some(value),
        TextRole::Tail => node.tail = Some(value),
    }
    true
}
