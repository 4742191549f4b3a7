/*!
 * Tests for error types and conversions
 */

use xliff_translator::errors::{AppError, ProviderError, TranslationError, XliffError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "Service unavailable".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service unavailable"));
}

#[test]
fn test_providerError_translationNotFound_shouldDisplayText() {
    let error = ProviderError::TranslationNotFound("Hello".to_string());
    assert_eq!(error.to_string(), "No translation found for: Hello");
}

#[test]
fn test_translationError_fromProviderError_shouldWrapCorrectly() {
    let provider_error = ProviderError::RateLimitExceeded("slow down".to_string());
    let error: TranslationError = provider_error.into();

    assert!(matches!(error, TranslationError::Provider(_)));
    assert!(error.to_string().contains("slow down"));
}

#[test]
fn test_translationError_runCountMismatch_shouldNameUnit() {
    let error = TranslationError::RunCountMismatch {
        unit_id: "u7".to_string(),
        expected: 3,
        actual: 2,
    };
    let display = error.to_string();
    assert!(display.contains("u7"));
    assert!(display.contains("expected 3, got 2"));
}

#[test]
fn test_xliffError_fromUtf8Error_shouldBeEncoding() {
    let bytes = vec![0xff, 0xfe];
    let utf8_error = std::str::from_utf8(&bytes).unwrap_err();
    let error: XliffError = utf8_error.into();

    assert!(matches!(error, XliffError::Encoding(_)));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.xlf");
    let error: AppError = io_error.into();

    assert!(matches!(error, AppError::File(_)));
    assert!(error.to_string().contains("missing.xlf"));
}

#[test]
fn test_appError_fromTranslationError_shouldKeepMessage() {
    let error: AppError = TranslationError::Aborted("stop".to_string()).into();

    assert!(matches!(error, AppError::Translation(_)));
    assert!(error.to_string().contains("stop"));
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(error, AppError::Unknown(_)));
}
