/*!
 * Tests for language utilities
 */

use xliff_translator::language_utils::{
    default_locale, get_language_name, is_auto, language_base, normalize_language,
    validate_language_code,
};

#[test]
fn test_validateLanguageCode_withKnownCodes_shouldSucceed() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("zh-CN").is_ok());
    assert!(validate_language_code("deu").is_ok());
    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("de-de").unwrap(), "German");
}

#[test]
fn test_isAuto_shouldAcceptEmptyAndAuto() {
    assert!(is_auto(""));
    assert!(is_auto(" AUTO "));
    assert!(!is_auto("en"));
}

#[test]
fn test_languageBase_shouldStripRegion() {
    assert_eq!(language_base("pt_BR"), "pt");
    assert_eq!(language_base("FR-fr"), "fr");
    assert_eq!(language_base("it"), "it");
}

#[test]
fn test_normalizeLanguage_shouldKeepRegionLowercased() {
    assert_eq!(normalize_language(Some("zh-CN")), "zh-cn");
    assert_eq!(normalize_language(Some("")), "auto");
}

#[test]
fn test_defaultLocale_withPresetLocale_shouldReturnIt() {
    assert_eq!(default_locale("es").as_deref(), Some("es-es"));
    assert_eq!(default_locale("it-it").as_deref(), Some("it-it"));
    assert_eq!(default_locale("pt"), None);
}
