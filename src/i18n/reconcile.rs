use log::{error, info};
use std::path::Path;

use crate::errors::DictionaryError;
use crate::i18n::dictionary::LocaleDictionary;
use crate::i18n::extract::KeyMap;
use crate::providers::Translator;

/// How a dictionary is brought in line with the extracted keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// Add missing keys (machine translated) and drop stale ones
    MergeAndTranslate,
    /// Rewrite every existing key to its extracted value or ""
    BlankReset,
}

/// Translation backend and language pair for merge-and-translate
#[derive(Clone, Copy)]
pub struct TranslationTarget<'a> {
    pub translator: &'a dyn Translator,
    pub source_language: &'a str,
    pub target_language: &'a str,
}

/// What a reconciliation changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub policy: ReconcilePolicy,
    /// Keys added with a translated value
    pub added: Vec<String>,
    /// Keys removed because they are no longer extracted
    pub removed: Vec<String>,
    /// Missing keys left out after a translation failure
    pub skipped: usize,
    /// Keys rewritten to their extracted value
    pub updated: usize,
    /// Keys rewritten to "" because nothing was extracted for them
    pub blanked: usize,
    /// First translation failure, if any
    pub translation_error: Option<String>,
}

impl ReconcileReport {
    fn new(policy: ReconcilePolicy) -> Self {
        Self {
            policy,
            added: Vec::new(),
            removed: Vec::new(),
            skipped: 0,
            updated: 0,
            blanked: 0,
            translation_error: None,
        }
    }

    /// Whether the key set of the dictionary changed
    pub fn keys_changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// Add missing keys via the translator, then delete keys no longer extracted
///
/// Only keys with a non-empty extracted value are added. The first
/// translation failure is logged and ends the addition phase; removal still
/// runs. `label` names the dictionary in log messages.
pub async fn merge_and_translate(
    dictionary: &mut LocaleDictionary,
    keys: &KeyMap,
    target: TranslationTarget<'_>,
    label: &str,
) -> ReconcileReport {
    let mut report = ReconcileReport::new(ReconcilePolicy::MergeAndTranslate);

    for (key, text) in keys {
        if text.is_empty() || dictionary.contains_key(key) {
            continue;
        }

        info!("Key '{}' not found in '{}'.", key, label);
        match target.translator
            .translate(text, target.source_language, target.target_language)
            .await
        {
            Ok(translated) => {
                dictionary.insert(key.clone(), translated);
                report.added.push(key.clone());
            }
            Err(e) => {
                error!("Error processing '{}' with {}: {}", label, target.translator.name(), e);
                report.translation_error = Some(e.to_string());
                break;
            }
        }
    }

    report.skipped = keys.iter()
        .filter(|(key, text)| !text.is_empty() && !dictionary.contains_key(key))
        .count();

    let stale: Vec<String> = dictionary.keys()
        .filter(|key| !keys.contains_key(*key))
        .map(str::to_string)
        .collect();

    for key in stale {
        info!("Key '{}' is no longer used, removing it from '{}'.", key, label);
        dictionary.remove(&key);
        report.removed.push(key);
    }

    report
}

/// Rewrite every dictionary value to the extracted text, or "" when the key
/// was not extracted. The key set is left untouched.
pub fn blank_reset(dictionary: &mut LocaleDictionary, keys: &KeyMap) -> ReconcileReport {
    let mut report = ReconcileReport::new(ReconcilePolicy::BlankReset);

    for (key, value) in dictionary.iter_mut() {
        match keys.get(key) {
            Some(text) => {
                value.clone_from(text);
                report.updated += 1;
            }
            None => {
                value.clear();
                report.blanked += 1;
            }
        }
    }

    report
}

/// Load a dictionary, merge-and-translate it, and write it back
pub async fn sync_file<P: AsRef<Path>>(
    path: P,
    keys: &KeyMap,
    target: TranslationTarget<'_>,
    dry_run: bool,
) -> Result<ReconcileReport, DictionaryError> {
    let path = path.as_ref();
    let label = path.display().to_string();

    let mut dictionary = LocaleDictionary::load(path)?;
    let report = merge_and_translate(&mut dictionary, keys, target, &label).await;

    if !dry_run {
        dictionary.save(path)?;
    }

    Ok(report)
}

/// Load a dictionary, blank-reset it, and write it back
pub fn reset_file<P: AsRef<Path>>(path: P, keys: &KeyMap, dry_run: bool) -> Result<ReconcileReport, DictionaryError> {
    let path = path.as_ref();

    let mut dictionary = LocaleDictionary::load(path)?;
    let report = blank_reset(&mut dictionary, keys);

    if !dry_run {
        dictionary.save(path)?;
    }

    Ok(report)
}
