/*!
 * Tests for dictionary reconciliation policies
 */

use anyhow::Result;
use std::fs;
use tavernkit::i18n::{
    blank_reset, merge_and_translate, reset_file, sync_file, KeyMap, LocaleDictionary,
    ReconcilePolicy, TranslationTarget,
};
use tavernkit::providers::mock::MockTranslator;
use crate::common;

fn key_map(pairs: &[(&str, &str)]) -> KeyMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn dictionary(pairs: &[(&str, &str)]) -> LocaleDictionary {
    pairs.iter().copied().collect()
}

fn target(translator: &MockTranslator) -> TranslationTarget<'_> {
    TranslationTarget {
        translator,
        source_language: "en",
        target_language: "zh-CN",
    }
}

/// Test that missing keys are translated and appended, stale keys removed
#[tokio::test]
async fn test_merge_and_translate_withMissingAndStaleKeys_shouldAddAndRemove() {
    common::init_logging();
    let translator = MockTranslator::working();
    let mut dict = dictionary(&[("old", "x"), ("keep", "kept")]);
    let keys = key_map(&[("keep", "Keep"), ("new", "New"), ("empty", "")]);

    let report = merge_and_translate(&mut dict, &keys, target(&translator), "zh-cn.json").await;

    assert_eq!(report.policy, ReconcilePolicy::MergeAndTranslate);
    assert_eq!(report.added, vec!["new".to_string()]);
    assert_eq!(report.removed, vec!["old".to_string()]);
    assert_eq!(report.skipped, 0);
    assert!(report.translation_error.is_none());
    assert!(report.keys_changed());

    assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["keep", "new"]);
    assert_eq!(dict.get("keep"), Some("kept"));
    assert_eq!(dict.get("new"), Some(MockTranslator::expected_translation("New", "zh-CN").as_str()));
    assert_eq!(translator.request_count(), 1);
}

/// Test that an up-to-date dictionary is left alone
#[tokio::test]
async fn test_merge_and_translate_withMatchingKeys_shouldChangeNothing() {
    let translator = MockTranslator::working();
    let mut dict = dictionary(&[("a", "一"), ("b", "二")]);
    let keys = key_map(&[("a", "One"), ("b", "Two")]);

    let report = merge_and_translate(&mut dict, &keys, target(&translator), "zh-cn.json").await;

    assert!(!report.keys_changed());
    assert_eq!(dict, dictionary(&[("a", "一"), ("b", "二")]));
    assert_eq!(translator.request_count(), 0);
}

/// Test that the first failure stops additions but removal still runs
#[tokio::test]
async fn test_merge_and_translate_withFailure_shouldStopAddingButStillRemove() {
    common::init_logging();
    let translator = MockTranslator::fail_after(1);
    let mut dict = dictionary(&[("stale", "s")]);
    let keys = key_map(&[("a", "A"), ("b", "B"), ("c", "C")]);

    let report = merge_and_translate(&mut dict, &keys, target(&translator), "zh-cn.json").await;

    assert_eq!(report.added, vec!["a".to_string()]);
    assert_eq!(report.removed, vec!["stale".to_string()]);
    assert_eq!(report.skipped, 2);
    assert!(report.translation_error.is_some());

    assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["a"]);
    assert_eq!(translator.request_count(), 2);
}

/// Test that keys present in the extraction are never deleted
#[tokio::test]
async fn test_merge_and_translate_withFailingTranslator_shouldKeepExtractedKeys() {
    let translator = MockTranslator::failing();
    let mut dict = dictionary(&[("x", "1"), ("y", "2"), ("gone", "3")]);
    let keys = key_map(&[("x", "X"), ("y", ""), ("z", "Z")]);

    let report = merge_and_translate(&mut dict, &keys, target(&translator), "zh-cn.json").await;

    for key in keys.keys().filter(|k| *k != "z") {
        assert!(dict.contains_key(key), "extracted key '{}' was deleted", key);
    }
    assert!(!dict.contains_key("gone"));
    assert_eq!(report.skipped, 1);
}

/// Test that blank-reset rewrites values without changing the key set
#[test]
fn test_blank_reset_shouldRewriteValuesOnly() {
    let mut dict = dictionary(&[("a", "old"), ("b", "old"), ("c", "old")]);
    let keys = key_map(&[("a", "A"), ("z", "Z")]);

    let report = blank_reset(&mut dict, &keys);

    assert_eq!(report.policy, ReconcilePolicy::BlankReset);
    assert_eq!(report.updated, 1);
    assert_eq!(report.blanked, 2);
    assert!(!report.keys_changed());
    assert_eq!(dict, dictionary(&[("a", "A"), ("b", ""), ("c", "")]));
}

/// Test that sync_file writes the reconciled dictionary
#[tokio::test]
async fn test_sync_file_shouldWriteResult() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "zh-cn.json", "{\"old\": \"x\"}")?;
    let translator = MockTranslator::working();
    let keys = key_map(&[("greet", "Hi")]);

    let report = sync_file(&path, &keys, target(&translator), false).await?;

    assert_eq!(report.added, vec!["greet".to_string()]);
    assert_eq!(fs::read_to_string(&path)?, "{\n    \"greet\": \"[zh-CN] Hi\"\n}\n");
    Ok(())
}

/// Test that a dry run leaves the file untouched
#[tokio::test]
async fn test_sync_file_withDryRun_shouldNotWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let original = "{\"old\": \"x\"}";
    let path = common::create_test_file(temp_dir.path(), "zh-cn.json", original)?;
    let translator = MockTranslator::working();
    let keys = key_map(&[("greet", "Hi")]);

    let report = sync_file(&path, &keys, target(&translator), true).await?;

    assert!(report.keys_changed());
    assert_eq!(fs::read_to_string(&path)?, original);
    Ok(())
}

/// Test that reset_file writes blanked values
#[test]
fn test_reset_file_shouldWriteResult() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "en.json", "{\"greet\": \"\", \"unused\": \"Bye\"}")?;
    let keys = key_map(&[("greet", "Hi")]);

    let report = reset_file(&path, &keys, false)?;

    assert_eq!(report.updated, 1);
    assert_eq!(report.blanked, 1);
    assert_eq!(fs::read_to_string(&path)?, "{\n    \"greet\": \"Hi\",\n    \"unused\": \"\"\n}\n");
    Ok(())
}
