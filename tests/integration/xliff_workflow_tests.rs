/*!
 * End-to-end tests for translating an XLIFF document and classifying the result
 */

use anyhow::Result;
use xliff_translator::providers::mock::MockProvider;
use xliff_translator::report::{filter_rows, QaSummary, ReportView};
use xliff_translator::translation::{BatchSettings, DocumentTranslator, Glossary};
use xliff_translator::validation::QaClassifier;
use xliff_translator::xliff::{collect_text_runs, XliffDocument};
use xliff_translator::xliff::document::{source_of, target_of};
use crate::common;

fn realistic_document() -> String {
    common::xliff_document(
        &[
            common::unit("welcome", "Welcome to <g id=\"1\">our store</g>!"),
            common::unit("thanks", "Thank you for your purchase"),
            common::unit("sku", "cmAbc123Xyz987"),
            common::unit("discount", "up to $3.5K"),
            r#"      <trans-unit id="spaced">
        <source>
          Add to <x id="1"/> cart
        </source>
      </trans-unit>"#
                .to_string(),
        ]
        .join("\n"),
    )
}

/// Test the full translate-then-classify flow
#[tokio::test]
async fn test_workflow_withMixedContent_shouldTranslateAndFlagOnlyLinguisticLeftovers() -> Result<()> {
    let provider = MockProvider::working().with_dictionary([
        ("Welcome to", "Bienvenue dans"),
        ("our store", "notre boutique"),
        ("!", "!"),
        ("Add to", "Ajouter au"),
        ("cart", "panier"),
        // backend leaves these untouched
        ("Thank you for your purchase", "Thank you for your purchase"),
        ("cmAbc123Xyz987", "cmAbc123Xyz987"),
        ("up to $3.5K", "up to $3.5K"),
    ]);
    let service = common::mock_service(provider);
    let options = common::fast_options("fr");
    let translator = DocumentTranslator::new(&service, &options, BatchSettings::default());

    let outcome = translator.translate_document(realistic_document().as_bytes()).await?;
    let rows = QaClassifier::new().classify(&outcome.results);

    let summary = QaSummary::from_rows(&rows);
    assert_eq!(summary.segments, 5);
    assert_eq!(summary.changed, 2);
    assert_eq!(summary.unchanged, 3);
    assert_eq!(summary.flagged, 1);

    let flagged = filter_rows(&rows, ReportView::Flagged, "");
    assert_eq!(flagged[0].unit_id, "thanks");
    assert_eq!(flagged[0].reasons, "Looks untranslated");
    Ok(())
}

/// Test that whitespace and inline tags survive in the written document
#[tokio::test]
async fn test_workflow_withIndentedSource_shouldKeepWhitespaceVerbatim() -> Result<()> {
    let provider = MockProvider::working().with_dictionary([("Add to", "Ajouter au"), ("cart", "panier")]);
    let service = common::mock_service(provider);
    let options = common::fast_options("fr");
    let translator = DocumentTranslator::new(&service, &options, BatchSettings::default());

    let outcome = translator.translate_document(realistic_document().as_bytes()).await?;
    let document = XliffDocument::parse(&outcome.bytes)?;
    let unit_ref = document
        .trans_units()
        .into_iter()
        .find(|u| u.id == "spaced")
        .unwrap();
    let unit = document.unit(&unit_ref).unwrap();
    let source = source_of(unit).unwrap();
    let target = target_of(unit).unwrap();

    assert_eq!(target.text.as_deref(), Some("\n          Ajouter au "));
    assert_eq!(target.children[0].attribute("id"), Some("1"));
    assert_eq!(target.children[0].tail.as_deref(), Some(" panier\n        "));
    assert_eq!(collect_text_runs(source).len(), collect_text_runs(target).len());
    Ok(())
}

/// Test that decoration applies to every translated run and nowhere else
#[tokio::test]
async fn test_workflow_withDecoration_shouldWrapEachRun() -> Result<()> {
    let provider = MockProvider::working().with_dictionary([("Hello", "Bonjour"), ("world", "monde")]);
    let service = common::mock_service(provider);
    let mut options = common::fast_options("fr");
    options.prefix_target = "[".to_string();
    options.suffix_target = "]".to_string();
    options.glossary = Glossary::from_pairs([("monde", "world!")]);
    let translator = DocumentTranslator::new(&service, &options, BatchSettings::default());
    let xml = common::xliff_document(
        &[
            common::unit("1", "Hello <b>world</b>"),
            common::unit("2", r#" <x id="1"/> "#),
        ]
        .join("\n"),
    );

    let outcome = translator.translate_document(xml.as_bytes()).await?;

    assert_eq!(outcome.results[0].target_text, "[Bonjour] [world!]");
    assert_eq!(outcome.results[1].target_text, "");
    let out = String::from_utf8(outcome.bytes)?;
    assert!(out.contains(r#"<target> <x id="1"/> </target>"#));
    Ok(())
}

/// Test that input without translatable units produces an empty result set
#[tokio::test]
async fn test_workflow_withoutUnits_shouldReturnNoResults() -> Result<()> {
    let provider = MockProvider::working();
    let service = common::mock_service(provider.clone());
    let options = common::fast_options("fr");
    let translator = DocumentTranslator::new(&service, &options, BatchSettings::default());

    let mut calls = 0;
    let outcome = translator
        .translate_document_with_progress(common::xliff_document("").as_bytes(), |_, _| {
            calls += 1;
            Ok(())
        })
        .await?;

    assert!(outcome.results.is_empty());
    assert_eq!(calls, 0);
    assert_eq!(provider.request_count(), 0);
    Ok(())
}
