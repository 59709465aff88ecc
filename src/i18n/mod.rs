//! Internationalization: the active language and message lookup.
//!
//! The locale store holds one [`LocaleTag`], persists it under its own storage
//! key and resolves message keys through the bundled catalog.

pub mod loader;

use crate::storage::KeyValueStore;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

// Re-export types
pub use loader::Catalog;

/// Local storage key of the selected language.
pub const LOCALE_KEY: &str = "portfolio-language";

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocaleTag {
    #[default]
    PtBr,
    En,
}

impl LocaleTag {
    /// The language tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LocaleTag::PtBr => "pt-BR",
            LocaleTag::En => "en",
        }
    }

    /// Native display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            LocaleTag::PtBr => "Português (Brasil)",
            LocaleTag::En => "English",
        }
    }

    /// Get all supported languages.
    pub fn all() -> &'static [LocaleTag] {
        &[LocaleTag::PtBr, LocaleTag::En]
    }

    /// Parse one of the supported tags, ignoring case (`pt-br` is `pt-BR`).
    /// Other tags, including other regions, are rejected.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let id: LanguageIdentifier = tag.trim().parse().ok()?;
        if id.script.is_some() {
            return None;
        }
        match (id.language.as_str(), id.region.as_ref().map(|r| r.as_str())) {
            ("pt", Some("BR")) => Some(LocaleTag::PtBr),
            ("en", None) => Some(LocaleTag::En),
            _ => None,
        }
    }

    /// Parse a stored tag. Any `pt`-prefixed tag reads as `pt-BR`.
    pub fn from_stored(tag: &str) -> Option<Self> {
        Self::from_tag(tag).or_else(|| {
            let id: LanguageIdentifier = tag.trim().parse().ok()?;
            (id.language.as_str() == "pt").then_some(LocaleTag::PtBr)
        })
    }
}

impl std::fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LocaleTag {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| LocaleError::UnknownTag(s.to_string()))
    }
}

/// Locale errors.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("Unsupported language tag: {0}")]
    UnknownTag(String),
}

/// Process-wide holder of the active language.
pub struct LocaleStore {
    tag: LocaleTag,
    storage: Box<dyn KeyValueStore>,
    catalog: Arc<Catalog>,
    storage_warned: bool,
}

impl LocaleStore {
    /// Load the stored tag with the bundled catalog.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        Self::load_with_catalog(storage, loader::bundled())
    }

    /// Load the stored tag. Unknown or malformed values fall back to the
    /// default; `pt` variants are normalized to `pt-BR` and rewritten.
    pub fn load_with_catalog(storage: Box<dyn KeyValueStore>, catalog: Arc<Catalog>) -> Self {
        let mut store = Self {
            tag: LocaleTag::default(),
            storage,
            catalog,
            storage_warned: false,
        };

        let stored = match store.storage.get(LOCALE_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read language, using default: {}", e);
                None
            }
        };

        if let Some(raw) = stored {
            let tag_str = serde_json::from_str::<String>(&raw).unwrap_or(raw);
            match LocaleTag::from_stored(&tag_str) {
                Some(tag) => {
                    store.tag = tag;
                    if tag.as_str() != tag_str {
                        tracing::info!("Normalizing stored language {} to {}", tag_str, tag);
                        store.persist();
                    }
                }
                None => tracing::warn!("Ignoring unsupported stored language: {}", tag_str),
            }
        }

        store
    }

    /// The active language.
    pub fn current_tag(&self) -> LocaleTag {
        self.tag
    }

    /// Whether a write to storage has failed.
    pub fn persistence_failed(&self) -> bool {
        self.storage_warned
    }

    /// Switch language by tag string. Unsupported tags are rejected with a
    /// warning and leave the store unchanged. Returns whether the tag was
    /// accepted.
    pub fn set_tag(&mut self, tag: &str) -> bool {
        match tag.parse::<LocaleTag>() {
            Ok(tag) => {
                self.set_language(tag);
                true
            }
            Err(e) => {
                tracing::warn!("{}", e);
                false
            }
        }
    }

    /// Switch language.
    pub fn set_language(&mut self, tag: LocaleTag) {
        self.tag = tag;
        self.persist();
        tracing::debug!("Language set to {}", tag);
    }

    /// Translate a message by key.
    pub fn t(&self, key: &str) -> String {
        self.catalog.resolve(self.tag, key)
    }

    fn persist(&mut self) {
        let value = match serde_json::to_string(self.tag.as_str()) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to encode language: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(LOCALE_KEY, &value) {
            if !self.storage_warned {
                self.storage_warned = true;
                tracing::warn!("Language not saved, keeping it in memory: {}", e);
            }
        }
    }
}

/// Macro for convenient translation.
#[macro_export]
macro_rules! t {
    ($store:expr, $key:expr) => {
        $store.t($key)
    };
}
