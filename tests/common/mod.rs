/*!
 * Common test utilities for the xliff-translator test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use xliff_translator::providers::mock::MockProvider;
use xliff_translator::translation::{TranslationOptions, TranslationService};
use xliff_translator::xliff::XLIFF_NS;

/// Routes library logs to the test output, once per test binary
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Wraps trans-unit markup in an XLIFF 1.2 document with one file
pub fn xliff_document(units: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="{}" version="1.2">
  <file original="app" source-language="en" datatype="plaintext">
    <body>
{}
    </body>
  </file>
</xliff>
"#,
        XLIFF_NS, units
    )
}

/// One trans-unit with the given source markup
pub fn unit(id: &str, source: &str) -> String {
    format!(
        r#"      <trans-unit id="{}"><source>{}</source></trans-unit>"#,
        id, source
    )
}

/// A document with `count` plain units `u1..uN` whose sources are `Text N`
pub fn numbered_document(count: usize) -> String {
    let units: Vec<String> = (1..=count)
        .map(|n| unit(&format!("u{}", n), &format!("Text {}", n)))
        .collect();
    xliff_document(&units.join("\n"))
}

/// Creates a sample XLIFF file for testing
pub fn create_test_xliff(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = xliff_document(
        &[
            unit("greeting", r#"Hello <g id="1">world</g>"#),
            unit("cart", "Your cart is empty"),
            unit("code", "cmAbc123Xyz987"),
        ]
        .join("\n"),
    );
    create_test_file(dir, filename, &content)
}

/// Translation service backed by a mock provider
pub fn mock_service(provider: MockProvider) -> TranslationService {
    TranslationService::with_provider(Arc::new(provider))
}

/// Options without retry delays
pub fn fast_options(target_language: &str) -> TranslationOptions {
    let mut options = TranslationOptions::new(target_language);
    options.retry_backoff = Duration::ZERO;
    options
}
