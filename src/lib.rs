//! Folio - Accessible Portfolio Runtime
//!
//! Client-side preferences and accessibility runtime for a personal portfolio
//! site, plus the server-side contact relay. Provides the preferences store
//! with document projection, audio cues, a live-region announcer, the locale
//! store, and the contact endpoint.

pub mod accessibility;
pub mod audio;
pub mod contact;
pub mod context;
pub mod html;
pub mod i18n;
pub mod storage;

// Re-export commonly used types
pub use accessibility::{Announcer, PreferenceRecord, PreferencesStore};
pub use audio::{CueKind, CueSynthesizer};
pub use context::AppContext;
pub use i18n::{LocaleStore, LocaleTag};
pub use storage::config::AppConfig;
