//! Message catalog loading.
//!
//! Catalogs are `.ftl`-style files of `key = value` lines, compiled into the
//! binary. `#` starts a comment line.

use super::LocaleTag;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Messages for every supported locale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<LocaleTag, HashMap<String, String>>,
}

impl Catalog {
    /// Catalog built from the bundled locale files.
    pub fn bundled() -> Self {
        let mut catalog = Self::default();
        for tag in LocaleTag::all() {
            catalog.insert_source(*tag, Self::bundled_source(*tag));
        }
        catalog
    }

    fn bundled_source(tag: LocaleTag) -> &'static str {
        match tag {
            LocaleTag::PtBr => include_str!("locales/pt-BR/main.ftl"),
            LocaleTag::En => include_str!("locales/en/main.ftl"),
        }
    }

    /// Parse `source` and merge its messages into `tag`.
    pub fn insert_source(&mut self, tag: LocaleTag, source: &str) {
        self.messages
            .entry(tag)
            .or_default()
            .extend(parse_ftl(source));
    }

    /// Message for `(tag, key)` without fallback.
    pub fn get(&self, tag: LocaleTag, key: &str) -> Option<&str> {
        self.messages
            .get(&tag)
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// Resolve `key` for `tag`: `tag`, then the default locale, then the key.
    pub fn resolve(&self, tag: LocaleTag, key: &str) -> String {
        self.get(tag, key)
            .or_else(|| self.get(LocaleTag::default(), key))
            .unwrap_or(key)
            .to_string()
    }

    /// Number of messages for `tag`.
    pub fn count(&self, tag: LocaleTag) -> usize {
        self.messages.get(&tag).map_or(0, HashMap::len)
    }

    /// Keys present in the default locale but missing from `tag`, sorted.
    pub fn missing_keys(&self, tag: LocaleTag) -> Vec<&str> {
        let Some(default) = self.messages.get(&LocaleTag::default()) else {
            return Vec::new();
        };
        let mut missing: Vec<&str> = default
            .keys()
            .filter(|key| self.get(tag, key).is_none())
            .map(String::as_str)
            .collect();
        missing.sort_unstable();
        missing
    }
}

/// Shared bundled catalog.
pub fn bundled() -> Arc<Catalog> {
    static CATALOG: OnceLock<Arc<Catalog>> = OnceLock::new();
    CATALOG
        .get_or_init(|| Arc::new(Catalog::bundled()))
        .clone()
}

/// Parse `key = value` lines.
pub fn parse_ftl(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();

        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if !key.is_empty() {
                map.insert(key.to_string(), value.trim().to_string());
            }
        }
    }
    map
}
