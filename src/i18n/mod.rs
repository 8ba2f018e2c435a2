/*!
 * Localization key extraction and dictionary reconciliation.
 *
 * - `extract`: collect `data-i18n` keys and their default text from markup
 * - `dictionary`: order-preserving JSON locale dictionaries
 * - `reconcile`: merge-and-translate and blank-reset policies
 */

pub mod dictionary;
pub mod extract;
pub mod reconcile;

pub use dictionary::LocaleDictionary;
pub use extract::{extract_directory, extract_keys, parse_marker, ExtractOptions, KeyMap, MarkerEntry};
pub use reconcile::{
    blank_reset, merge_and_translate, reset_file, sync_file, ReconcilePolicy, ReconcileReport,
    TranslationTarget,
};
