/*!
 * Tests for the model preset table
 */

use std::collections::HashSet;
use tavernkit::launcher::{model_presets, ModelPreset};

/// Test the size of the preset table
#[test]
fn test_model_presets_shouldContainAllEntries() {
    let presets = model_presets("");

    assert_eq!(presets.len(), 43);
    assert!(!presets.is_empty());
}

/// Test that labels are unique
#[test]
fn test_model_presets_labels_shouldBeUnique() {
    let presets = model_presets("");
    let labels: HashSet<String> = presets.labels().map(|l| l.to_lowercase()).collect();

    assert_eq!(labels.len(), presets.len());
}

/// Test that the version reaches every preset
#[test]
fn test_model_presets_withVersion_shouldApplyToAll() {
    let presets = model_presets("4");

    assert!(presets.iter().all(|(_, preset)| preset.version == "4"));
    let args = presets.get("Erebus 6B").map(ModelPreset::args);
    assert_eq!(
        args,
        Some(vec!["-m".to_string(), "KoboldAI/OPT-6.7B-Erebus".to_string(), "-g".to_string(), "4".to_string()])
    );
}

/// Test that an empty version adds no -g flag
#[test]
fn test_model_presets_withoutVersion_shouldOmitVersionFlag() {
    let presets = model_presets("");
    let preset = presets.get("Pygmalion 6B");

    assert_eq!(preset.map(|p| p.to_string()).as_deref(), Some("-m PygmalionAI/pygmalion-6b"));
}

/// Test case-insensitive lookup and the revision override
#[test]
fn test_get_withDifferentCase_shouldFindPresetWithRevision() {
    let presets = model_presets("");
    let preset = presets.get("  pygmalion 6b DEV ");

    assert_eq!(preset.map(|p| p.revision.as_str()), Some("dev"));
    assert_eq!(
        preset.map(|p| p.to_string()).as_deref(),
        Some("-m PygmalionAI/pygmalion-6b -r dev")
    );
}

/// Test lookup of an unknown label
#[test]
fn test_get_withUnknownLabel_shouldReturnNone() {
    assert!(model_presets("").get("GPT-5 Turbo").is_none());
}

/// Test that the table keeps its declared order
#[test]
fn test_model_presets_shouldKeepDeclaredOrder() {
    let presets = model_presets("");
    let labels: Vec<&str> = presets.labels().collect();

    assert_eq!(labels.first().copied(), Some("Nerys V2 6B"));
    assert_eq!(labels.last().copied(), Some("Dolly_Pyg-6B"));
}
