use anyhow::{Result, anyhow};
use isolang::Language;
use std::path::Path;

/// Language utilities for locale tag handling
///
/// Locale dictionaries and translation backends identify languages with
/// short tags such as `en`, `ja` or `zh-CN`: an ISO 639-1 code optionally
/// followed by a region subtag.
/// A parsed locale tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTag {
    /// ISO 639-1 language code, lowercase
    pub language: String,
    /// Region subtag, uppercase
    pub region: Option<String>,
}

impl LocaleTag {
    /// Parse a tag such as `zh-CN`, `zh_cn` or `en`
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let mut parts = trimmed.split(['-', '_']);

        let language = parts.next().unwrap_or_default().to_lowercase();
        if language.len() != 2 || Language::from_639_1(&language).is_none() {
            return Err(anyhow!("Invalid language code: {}", tag));
        }

        let region = match parts.next() {
            Some(region) if (2..=4).contains(&region.len()) && region.chars().all(|c| c.is_ascii_alphanumeric()) => {
                Some(region.to_uppercase())
            }
            Some(_) => return Err(anyhow!("Invalid region in locale tag: {}", tag)),
            None => None,
        };

        if parts.next().is_some() {
            return Err(anyhow!("Unsupported locale tag: {}", tag));
        }

        Ok(Self { language, region })
    }

    /// English name of the language
    pub fn language_name(&self) -> String {
        Language::from_639_1(&self.language)
            .map(|lang| lang.to_name().to_string())
            .unwrap_or_else(|| self.language.clone())
    }
}

impl std::fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

/// Normalize a locale tag to its canonical spelling (`zh_cn` -> `zh-CN`)
pub fn normalize_locale(tag: &str) -> Result<String> {
    Ok(LocaleTag::parse(tag)?.to_string())
}

/// Get the language name from a locale tag
pub fn get_language_name(tag: &str) -> Result<String> {
    Ok(LocaleTag::parse(tag)?.language_name())
}

/// Derive the locale of a dictionary file from its name (`locales/zh-cn.json` -> `zh-CN`)
pub fn locale_from_path<P: AsRef<Path>>(path: P) -> Option<String> {
    let stem = path.as_ref().file_stem()?.to_string_lossy().to_string();
    normalize_locale(&stem).ok()
}
