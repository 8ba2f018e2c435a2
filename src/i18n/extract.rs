use indexmap::IndexMap;
use log::{debug, info};
use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::path::Path;

use crate::app_config::I18nConfig;
use crate::errors::ExtractionError;
use crate::file_utils::FileManager;

/// Translation key -> default text, in the order keys first appear in the markup
///
/// A key seen again keeps its first position and takes the later value.
pub type KeyMap = IndexMap<String, String>;

/// One entry of a marker attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerEntry<'a> {
    /// `[attr]key`: the value comes from the element's `attr` attribute
    Attribute { attribute: &'a str, key: &'a str },
    /// `key`: the value is the element's trimmed text
    Text { key: &'a str },
}

impl MarkerEntry<'_> {
    pub fn key(&self) -> &str {
        match self {
            MarkerEntry::Attribute { key, .. } | MarkerEntry::Text { key } => *key,
        }
    }
}

/// Classify a single marker entry
///
/// Returns `None` for an unterminated `[attr` prefix or an empty key.
pub fn parse_marker(entry: &str) -> Option<MarkerEntry<'_>> {
    let marker = match entry.strip_prefix('[') {
        Some(rest) => {
            let end = rest.find(']')?;
            MarkerEntry::Attribute {
                attribute: &rest[..end],
                key: &rest[end + 1..],
            }
        }
        None => MarkerEntry::Text { key: entry },
    };

    if marker.key().is_empty() {
        return None;
    }

    Some(marker)
}

/// Settings controlling extraction
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Attribute flagging an element for localization
    pub marker_attribute: String,
    /// Treat `;` in a marker value as an entry separator
    pub split_markers: bool,
    /// Extension of the markup files to scan
    pub extension: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            marker_attribute: "data-i18n".to_string(),
            split_markers: true,
            extension: "html".to_string(),
        }
    }
}

impl From<&I18nConfig> for ExtractOptions {
    fn from(config: &I18nConfig) -> Self {
        Self {
            marker_attribute: config.marker_attribute.clone(),
            split_markers: config.split_markers,
            extension: config.extension.clone(),
        }
    }
}

impl ExtractOptions {
    fn selector(&self) -> Result<Selector, ExtractionError> {
        Selector::parse(&format!("[{}]", self.marker_attribute))
            .map_err(|_| ExtractionError::InvalidMarker(self.marker_attribute.clone()))
    }
}

/// Extract the key mapping of one markup document
pub fn extract_keys(html: &str, options: &ExtractOptions) -> Result<KeyMap, ExtractionError> {
    let selector = options.selector()?;
    let document = Html::parse_document(html);
    let mut keys = KeyMap::new();

    collect_keys(&document, &selector, options, &mut keys);

    Ok(keys)
}

fn collect_keys(document: &Html, selector: &Selector, options: &ExtractOptions, keys: &mut KeyMap) {
    let marker_attribute = options.marker_attribute.to_ascii_lowercase();

    for element in document.select(selector) {
        let Some(marker) = element.value().attr(&marker_attribute) else {
            continue;
        };

        let entries: Vec<&str> = if options.split_markers {
            marker.split(';').collect()
        } else {
            vec![marker]
        };

        for entry in entries {
            match parse_marker(entry) {
                Some(MarkerEntry::Attribute { attribute, key }) => {
                    let value = element.value()
                        .attr(&attribute.to_ascii_lowercase())
                        .unwrap_or_default();
                    keys.insert(key.to_string(), value.to_string());
                }
                Some(MarkerEntry::Text { key }) => {
                    keys.insert(key.to_string(), element_text(&element));
                }
                None => debug!("Ignoring marker entry '{}'", entry),
            }
        }
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extract keys from every markup file under `root`
///
/// Files are visited in path order; a key found in a later file replaces
/// the value from an earlier one.
pub fn extract_directory<P: AsRef<Path>>(root: P, options: &ExtractOptions) -> Result<KeyMap, ExtractionError> {
    let root = root.as_ref();
    let selector = options.selector()?;

    let files = FileManager::find_files(root, &options.extension)
        .map_err(|e| ExtractionError::Walk {
            path: root.to_path_buf(),
            message: format!("{:#}", e),
        })?;

    let mut keys = KeyMap::new();
    for file in &files {
        let html = fs::read_to_string(file)
            .map_err(|source| ExtractionError::Read { path: file.clone(), source })?;

        let before = keys.len();
        let document = Html::parse_document(&html);
        collect_keys(&document, &selector, options, &mut keys);
        debug!("{:?}: {} new key(s)", file, keys.len() - before);
    }

    info!("Extracted {} key(s) from {} file(s) under {:?}", keys.len(), files.len(), root);
    Ok(keys)
}
