//! Accessibility preferences runtime.
//!
//! This module provides:
//! - The preference record and its invariants
//! - The preferences store with persistence and OS hints
//! - Projection of preferences onto the document root
//! - A polite live region for screen reader announcements

pub mod preferences;
pub mod projection;
pub mod screen_reader;
pub mod store;
pub mod system_hints;

// Re-export primary types
pub use preferences::{FontScale, PreferenceFlag, PreferenceRecord, SoundSettings};
pub use projection::{DocumentRoot, InMemoryDocument};
pub use screen_reader::{
    Announcer, Clock, LiveRegion, ManualClock, ScreenReaderSupport, SystemClock,
};
pub use store::{PreferencesStore, PREFERENCES_KEY};
pub use system_hints::{EnvSystemPreferences, FixedSystemPreferences, SystemPreferences};
