/*!
 * Common test utilities for the tavernkit test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
///
/// Parent directories of `filename` are created as needed.
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample page carrying plain, bracketed and multi-entry markers
pub fn create_test_page(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"<!DOCTYPE html>
<html>
<head><title data-i18n="page_title">Tavern</title></head>
<body>
    <h1 data-i18n="welcome">
        Welcome <b>back</b>
    </h1>
    <input data-i18n="[placeholder]search_hint" placeholder="Search...">
    <button data-i18n="[title]send_tip;send_label" title="Send message">Send</button>
    <div data-i18n="[aria-label]missing_attr"></div>
</body>
</html>
"#;
    create_test_file(dir, filename, content)
}

/// Initialise test logging once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
