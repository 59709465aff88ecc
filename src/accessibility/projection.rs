//! Projection of the preference record onto the document root.
//!
//! The stylesheet reacts to the root element alone: the font scale becomes a
//! CSS custom property plus the root `font-size`, and every enabled boolean
//! becomes a presence-only `data-*` attribute.

use super::preferences::{PreferenceFlag, PreferenceRecord};
use crate::html;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

/// CSS custom property carrying the base font size.
pub const FONT_SIZE_PROPERTY: &str = "--font-size-base";

/// Root `font-size` style property.
pub const ROOT_FONT_SIZE: &str = "font-size";

/// The document root element as seen by the preferences store.
pub trait DocumentRoot: Send {
    /// Set an attribute.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Remove an attribute (no-op when absent).
    fn remove_attribute(&mut self, name: &str);

    /// Set an inline style property, including custom properties.
    fn set_style_property(&mut self, name: &str, value: &str);
}

/// Project `record` onto `root`.
pub fn project(record: &PreferenceRecord, root: &mut dyn DocumentRoot) {
    let size = format!("{}px", record.font_scale.px());
    root.set_style_property(FONT_SIZE_PROPERTY, &size);
    root.set_style_property(ROOT_FONT_SIZE, &size);

    for flag in PreferenceFlag::all() {
        if record.flag(*flag) {
            root.set_attribute(flag.attribute(), "");
        } else {
            root.remove_attribute(flag.attribute());
        }
    }
}

#[derive(Debug, Default)]
struct RootState {
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
}

/// In-memory document root. Clones share state, so a host can keep one clone
/// for rendering while the store owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    state: Arc<Mutex<RootState>>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.lock().attributes.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.lock().attributes.get(name).cloned()
    }

    /// Attribute names currently set, sorted.
    pub fn attribute_names(&self) -> Vec<String> {
        self.lock().attributes.keys().cloned().collect()
    }

    pub fn style_property(&self, name: &str) -> Option<String> {
        self.lock().style.get(name).cloned()
    }

    /// Attributes for the server-rendered `<html>` tag, e.g.
    /// `data-high-contrast style="--font-size-base: 18px; font-size: 18px"`.
    pub fn render_root_attributes(&self) -> String {
        let state = self.lock();
        let mut parts: Vec<String> = state
            .attributes
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{}=\"{}\"", name, html::escape(value))
                }
            })
            .collect();

        if !state.style.is_empty() {
            // Custom properties first so `font-size` can reference them.
            let mut declarations: Vec<(&String, &String)> = state.style.iter().collect();
            declarations.sort_by_key(|(name, _)| !name.starts_with("--"));
            let style = declarations
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value))
                .collect::<Vec<_>>()
                .join("; ");
            parts.push(format!("style=\"{}\"", html::escape(&style)));
        }

        parts.join(" ")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RootState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentRoot for InMemoryDocument {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.lock()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, name: &str) {
        self.lock().attributes.remove(name);
    }

    fn set_style_property(&mut self, name: &str, value: &str) {
        self.lock().style.insert(name.to_string(), value.to_string());
    }
}
