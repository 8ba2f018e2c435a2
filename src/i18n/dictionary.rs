use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::errors::DictionaryError;

/// A locale dictionary as stored on disk: key -> translated text
///
/// Key order is the order of the file; new keys are appended at the end
/// and removals keep the remaining keys in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleDictionary {
    entries: IndexMap<String, String>,
}

impl LocaleDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary from a UTF-8 JSON object of strings
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| DictionaryError::Read { path: path.to_path_buf(), source })?;

        Self::from_json_str(&content)
            .map_err(|source| DictionaryError::Parse { path: path.to_path_buf(), source })
    }

    /// Parse a dictionary from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let entries: IndexMap<String, String> = serde_json::from_str(content)?;
        Ok(Self { entries })
    }

    /// Render as JSON with 4-space indentation and a trailing newline
    ///
    /// Non-ASCII text is written as-is rather than escaped.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.entries.serialize(&mut serializer)?;
        buffer.push(b'\n');
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the dictionary back to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let path = path.as_ref();
        let content = self.to_json_string()
            .map_err(|e| DictionaryError::Write { path: path.to_path_buf(), message: e.to_string() })?;

        fs::write(path, content)
            .map_err(|e| DictionaryError::Write { path: path.to_path_buf(), message: e.to_string() })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert or replace a value; an existing key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a key without disturbing the order of the others
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
