/*!
 * Tests for the text run walker
 */

use xliff_translator::xliff::tree;
use xliff_translator::xliff::walker::set_run_text;
use xliff_translator::xliff::{collect_text_runs, TextRole};

/// Test that runs record the slot and path they were read from
#[test]
fn test_collectTextRuns_shouldRecordRolesAndPaths() {
    let root = tree::parse(b"<s>A<b>B<i>C</i>D</b>E<u>F</u></s>").unwrap();

    let runs = collect_text_runs(&root);

    let cores: Vec<&str> = runs.iter().map(|r| r.core.as_str()).collect();
    assert_eq!(cores, vec!["A", "B", "E", "C", "D", "F"]);
    assert_eq!(runs[2].role, TextRole::Tail);
    assert_eq!(runs[2].path, vec![0]);
    assert_eq!(runs[3].path, vec![0, 0]);
}

/// Test that whitespace-only slots never produce runs
#[test]
fn test_collectTextRuns_withWhitespaceOnlySlots_shouldSkipThem() {
    let root = tree::parse(b"<s>\n  <x/>  <b> </b>\n</s>").unwrap();

    assert!(collect_text_runs(&root).is_empty());
}

/// Test that a clone walks to the same runs as the original
#[test]
fn test_collectTextRuns_onClone_shouldMatchOriginal() {
    let root = tree::parse(br#"<s> Hi <g id="1">there <x id="2"/> friend</g>! </s>"#).unwrap();
    let clone = root.clone();

    assert_eq!(collect_text_runs(&root), collect_text_runs(&clone));
    assert_eq!(collect_text_runs(&root).len(), 4);
}

/// Test that writing runs back only touches their slots
#[test]
fn test_setRunText_shouldWriteIntoRecordedSlot() {
    let mut root = tree::parse(b"<s> Hello <b>world</b> !</s>").unwrap();
    let runs = collect_text_runs(&root);

    for run in &runs {
        let value = run.reassemble(&run.core.to_uppercase());
        assert!(set_run_text(&mut root, run, value));
    }

    assert_eq!(root.text.as_deref(), Some(" HELLO "));
    assert_eq!(root.children[0].text.as_deref(), Some("WORLD"));
    assert_eq!(root.children[0].tail.as_deref(), Some(" !"));
}
