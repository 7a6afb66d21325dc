//! Static translation table keyed by dotted identifiers.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use shared::domain::Locale;
use thiserror::Error;

const BUILTIN_TABLE: &str = include_str!("locales.toml");

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("malformed translation table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read translation file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LocalizedText {
    en: Option<String>,
    hi: Option<String>,
    od: Option<String>,
}

impl LocalizedText {
    fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::En => self.en.as_deref(),
            Locale::Hi => self.hi.as_deref(),
            Locale::Od => self.od.as_deref(),
        }
    }

    fn merge(&mut self, other: LocalizedText) {
        if other.en.is_some() {
            self.en = other.en;
        }
        if other.hi.is_some() {
            self.hi = other.hi;
        }
        if other.od.is_some() {
            self.od = other.od;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    table: HashMap<String, LocalizedText>,
}

impl Translator {
    pub fn builtin(locale: Locale) -> Result<Self, I18nError> {
        Self::from_toml_str(BUILTIN_TABLE, locale)
    }

    pub fn from_toml_str(raw: &str, locale: Locale) -> Result<Self, I18nError> {
        let table = toml::from_str::<HashMap<String, LocalizedText>>(raw)?;
        Ok(Self { locale, table })
    }

    /// Layers entries from `path` over the current table, per locale string.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize, I18nError> {
        let raw = fs::read_to_string(path).map_err(|source| I18nError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let overrides = toml::from_str::<HashMap<String, LocalizedText>>(&raw)?;
        let merged = overrides.len();
        for (key, text) in overrides {
            self.table.entry(key).or_default().merge(text);
        }
        tracing::debug!(path = %path.display(), merged, "merged translation overrides");
        Ok(merged)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Unknown keys, and keys without an entry for the active locale, come back verbatim.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.table
            .get(key)
            .and_then(|text| text.get(self.locale))
            .unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
