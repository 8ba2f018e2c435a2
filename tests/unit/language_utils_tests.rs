/*!
 * Tests for locale tag utilities
 */

use tavernkit::language_utils::{get_language_name, locale_from_path, normalize_locale, LocaleTag};

#[test]
fn test_normalize_locale_withVariousSpellings_shouldCanonicalize() {
    assert_eq!(normalize_locale("zh_cn").ok().as_deref(), Some("zh-CN"));
    assert_eq!(normalize_locale(" EN ").ok().as_deref(), Some("en"));
    assert_eq!(normalize_locale("pt-br").ok().as_deref(), Some("pt-BR"));
    assert!(normalize_locale("zh-").is_err());
    assert!(normalize_locale("en-US-x").is_err());
}

#[test]
fn test_get_language_name_withValidCodes_shouldReturnEnglishName() {
    assert_eq!(get_language_name("ja").ok().as_deref(), Some("Japanese"));
    assert_eq!(get_language_name("fr-CA").ok().as_deref(), Some("French"));
    assert!(get_language_name("xx").is_err());
}

#[test]
fn test_locale_tag_display_withRegion() {
    let tag = LocaleTag {
        language: "zh".to_string(),
        region: Some("TW".to_string()),
    };
    assert_eq!(tag.to_string(), "zh-TW");
}

#[test]
fn test_locale_from_path_withDictionaryFiles() {
    assert_eq!(locale_from_path("public/locales/ja-jp.json").as_deref(), Some("ja-JP"));
    assert_eq!(locale_from_path("it.json").as_deref(), Some("it"));
    assert_eq!(locale_from_path("public/locales/readme.md"), None);
}
