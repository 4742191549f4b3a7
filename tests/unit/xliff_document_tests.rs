/*!
 * Tests for the XML tree and XLIFF document model
 */

use anyhow::Result;
use xliff_translator::errors::XliffError;
use xliff_translator::xliff::document::{extract_visible_text, source_of};
use xliff_translator::xliff::XliffDocument;
use crate::common;

/// Test that units are discovered in document order with their ids
#[test]
fn test_transUnits_withIdsAndMissingIds_shouldResolveIds() -> Result<()> {
    let xml = common::xliff_document(
        r#"<trans-unit id="a"><source>One</source></trans-unit>
           <trans-unit><source>Two</source></trans-unit>
           <trans-unit id=""><source>Three</source></trans-unit>"#,
    );
    let document = XliffDocument::parse(xml.as_bytes())?;

    let ids: Vec<String> = document.trans_units().into_iter().map(|u| u.id).collect();
    assert_eq!(ids, vec!["a", "row-2", "row-3"]);
    Ok(())
}

/// Test that units without a source are skipped
#[test]
fn test_transUnits_withoutSource_shouldBeSkipped() -> Result<()> {
    let xml = common::xliff_document(
        r#"<trans-unit id="empty"><note>nothing</note></trans-unit>
           <trans-unit id="real"><source>Hi</source></trans-unit>"#,
    );
    let document = XliffDocument::parse(xml.as_bytes())?;

    let units = document.trans_units();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].id, "real");
    Ok(())
}

/// Test that units nested in groups are found
#[test]
fn test_transUnits_insideGroups_shouldBeFound() -> Result<()> {
    let xml = common::xliff_document(
        r#"<group id="g"><trans-unit id="inner"><source>Hi</source></trans-unit></group>"#,
    );
    let document = XliffDocument::parse(xml.as_bytes())?;

    assert_eq!(document.trans_units()[0].id, "inner");
    Ok(())
}

/// Test that units from another namespace are ignored
#[test]
fn test_transUnits_inForeignNamespace_shouldBeIgnored() -> Result<()> {
    let xml = r#"<xliff xmlns="urn:other"><file><body>
        <trans-unit id="1"><source>Hi</source></trans-unit>
    </body></file></xliff>"#;
    let document = XliffDocument::parse(xml.as_bytes())?;

    assert!(document.trans_units().is_empty());
    Ok(())
}

/// Test visible text flattening across inline markup
#[test]
fn test_extractVisibleText_shouldIgnoreMarkupAndCollapseWhitespace() -> Result<()> {
    let xml = common::xliff_document(&common::unit(
        "1",
        "  Hello\n   <g id=\"1\">big</g>   <x id=\"2\"/>world ",
    ));
    let document = XliffDocument::parse(xml.as_bytes())?;
    let unit = document.unit(&document.trans_units()[0]).unwrap();

    assert_eq!(extract_visible_text(source_of(unit)), "Hello big world");
    assert_eq!(extract_visible_text(None), "");
    Ok(())
}

/// Test the file-level target-language override
#[test]
fn test_setFileTargetLanguage_shouldUpdateFirstFile() -> Result<()> {
    let xml = common::xliff_document(&common::unit("1", "Hi"));
    let mut document = XliffDocument::parse(xml.as_bytes())?;

    assert!(document.set_file_target_language("fr-fr"));
    assert_eq!(document.file_target_language(), Some("fr-fr"));

    let reparsed = XliffDocument::parse(&document.to_bytes()?)?;
    assert_eq!(reparsed.file_target_language(), Some("fr-fr"));
    Ok(())
}

/// Test that serialization keeps the namespace and entities
#[test]
fn test_toBytes_shouldKeepNamespaceAndEscapes() -> Result<()> {
    let xml = common::xliff_document(&common::unit("1", "Fish &amp; chips &lt;3"));
    let document = XliffDocument::parse(xml.as_bytes())?;

    let out = String::from_utf8(document.to_bytes()?)?;
    assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(out.contains(r#"xmlns="urn:oasis:names:tc:xliff:document:1.2""#));
    assert!(out.contains("Fish &amp; chips &lt;3"));
    Ok(())
}

/// Test that malformed input is rejected
#[test]
fn test_parse_withMalformedXml_shouldFail() {
    let result = XliffDocument::parse(b"<xliff><file></xliff>");
    assert!(matches!(result, Err(XliffError::Malformed(_))));

    let result = XliffDocument::parse(&[0x3c, 0x61, 0xff, 0x3e]);
    assert!(result.is_err());
}
