/*!
 * # tavernkit - helper utilities for a chat front-end and its extras backend
 *
 * ## Features
 *
 * - Launch the extras server in a notebook environment and expose it
 *   through a tunnel, reporting the public URL
 * - Named model presets turned into server arguments
 * - Extract `data-i18n` localization keys from HTML files
 * - Reconcile locale dictionaries against the extracted keys:
 *   - merge-and-translate: add missing keys via machine translation and
 *     drop stale ones
 *   - blank-reset: rewrite every value to the extracted text or ""
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: Runs each command against the configuration
 * - `launcher`: Server start, tunnel URL discovery and model presets
 * - `i18n`: Key extraction, locale dictionaries and reconciliation
 * - `providers`: Translation backends (Google, LibreTranslate, DeepLX, mock)
 * - `file_utils`: File system operations
 * - `language_utils`: Locale tag utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod i18n;
pub mod language_utils;
pub mod launcher;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{DictionaryError, ExtractionError, LauncherError, ProviderError};
pub use i18n::{KeyMap, LocaleDictionary, ReconcilePolicy, ReconcileReport};
pub use launcher::{ModelPreset, TunnelOutcome};
pub use providers::Translator;
