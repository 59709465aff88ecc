//! Preferences store.
//!
//! Owns the [`PreferenceRecord`]. Every mutator goes through [`commit`], which
//! applies the new record and then persists it, projects it onto the document
//! root, announces the change and plays a cue, in that order. Only the state
//! update is required to succeed; the rest is best-effort.
//!
//! [`commit`]: PreferencesStore::commit

use super::preferences::{
    clamp_volume, PersistedPreferences, PreferenceFlag, PreferenceRecord, UserIntent,
};
use super::projection::{project, DocumentRoot};
use super::screen_reader::ScreenReaderSupport;
use super::system_hints::SystemPreferences;
use crate::audio::{CueKind, CueSynthesizer};
use crate::storage::KeyValueStore;
use std::sync::Arc;

/// Local storage key of the preference record.
pub const PREFERENCES_KEY: &str = "portfolio-accessibility";

/// Side effects requested by a mutation.
#[derive(Debug, Default)]
struct Feedback {
    announcement: Option<String>,
    cue: Option<CueKind>,
}

impl Feedback {
    fn new(announcement: impl Into<String>, cue: CueKind) -> Self {
        Self {
            announcement: Some(announcement.into()),
            cue: Some(cue),
        }
    }
}

/// Process-wide holder of the accessibility and audio preferences.
pub struct PreferencesStore {
    record: PreferenceRecord,
    intent: UserIntent,
    storage: Box<dyn KeyValueStore>,
    document: Box<dyn DocumentRoot>,
    announcer: Option<Arc<dyn ScreenReaderSupport>>,
    cues: Option<Arc<CueSynthesizer>>,
    storage_warned: bool,
}

impl PreferencesStore {
    /// Load the store: stored record over defaults, OS hints for fields the
    /// user never set, then project onto the document.
    pub fn load(
        storage: Box<dyn KeyValueStore>,
        document: Box<dyn DocumentRoot>,
        hints: &dyn SystemPreferences,
    ) -> Self {
        let persisted = Self::read_persisted(storage.as_ref());
        let intent = persisted.intent();

        let mut base = PreferenceRecord::default();
        if !intent.reduced_motion {
            if let Some(reduced) = hints.prefers_reduced_motion() {
                base.reduced_motion = reduced;
            }
        }
        if !intent.high_contrast {
            if let Some(contrast) = hints.prefers_more_contrast() {
                base.high_contrast = contrast;
            }
        }

        let mut store = Self {
            record: persisted.overlay(base),
            intent,
            storage,
            document,
            announcer: None,
            cues: None,
            storage_warned: false,
        };
        project(&store.record, store.document.as_mut());

        tracing::debug!("Preferences loaded: {:?}", store.record);
        store
    }

    /// Attach the announcer used for mutation feedback.
    pub fn with_announcer(mut self, announcer: Arc<dyn ScreenReaderSupport>) -> Self {
        self.announcer = Some(announcer);
        self
    }

    /// Attach the synthesizer used for mutation feedback.
    pub fn with_cues(mut self, cues: Arc<CueSynthesizer>) -> Self {
        self.cues = Some(cues);
        self
    }

    fn read_persisted(storage: &dyn KeyValueStore) -> PersistedPreferences {
        let raw = match storage.get(PREFERENCES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return PersistedPreferences::default(),
            Err(e) => {
                tracing::warn!("Failed to read preferences, using defaults: {}", e);
                return PersistedPreferences::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed stored preferences: {}", e);
            PersistedPreferences::default()
        })
    }

    /// Snapshot of the current record.
    pub fn record(&self) -> PreferenceRecord {
        self.record
    }

    /// Whether a write to storage has failed. Changes stay in memory for the
    /// rest of the session.
    pub fn persistence_failed(&self) -> bool {
        self.storage_warned
    }

    pub fn increase_font_scale(&mut self) {
        match self.record.font_scale.increased() {
            Some(scale) => self.commit(
                PreferenceRecord {
                    font_scale: scale,
                    ..self.record
                },
                Feedback::new(format!("Font size {} pixels", scale.px()), CueKind::Click),
            ),
            None => self.reject("Font size is already at its maximum"),
        }
    }

    pub fn decrease_font_scale(&mut self) {
        match self.record.font_scale.decreased() {
            Some(scale) => self.commit(
                PreferenceRecord {
                    font_scale: scale,
                    ..self.record
                },
                Feedback::new(format!("Font size {} pixels", scale.px()), CueKind::Click),
            ),
            None => self.reject("Font size is already at its minimum"),
        }
    }

    pub fn toggle_high_contrast(&mut self) {
        self.toggle(PreferenceFlag::HighContrast);
    }

    pub fn toggle_reduced_motion(&mut self) {
        self.toggle(PreferenceFlag::ReducedMotion);
    }

    pub fn toggle_large_text(&mut self) {
        self.toggle(PreferenceFlag::LargeText);
    }

    pub fn toggle_focus_indicators(&mut self) {
        self.toggle(PreferenceFlag::FocusIndicators);
    }

    pub fn toggle_keyboard_navigation(&mut self) {
        self.toggle(PreferenceFlag::KeyboardNavigation);
    }

    pub fn toggle_screen_reader_mode(&mut self) {
        self.toggle(PreferenceFlag::ScreenReaderMode);
    }

    pub fn toggle_sound(&mut self) {
        self.toggle(PreferenceFlag::SoundEnabled);
    }

    /// Flip a boolean preference.
    pub fn toggle(&mut self, flag: PreferenceFlag) {
        let next = self.record.toggled(flag);
        let state = if next.flag(flag) { "enabled" } else { "disabled" };
        self.intent.note(flag);
        self.commit(
            next,
            Feedback::new(format!("{} {}", flag.label(), state), CueKind::Success),
        );
    }

    /// Store `max(0, min(1, volume))`. NaN is ignored.
    pub fn set_sound_volume(&mut self, volume: f64) {
        let Some(volume) = clamp_volume(volume) else {
            tracing::debug!("Ignoring NaN sound volume");
            return;
        };

        self.commit(
            PreferenceRecord {
                sound_volume: volume,
                ..self.record
            },
            Feedback::new(
                format!("Sound volume {} percent", (volume * 100.0).round() as u32),
                CueKind::Click,
            ),
        );
    }

    /// Restore defaults and clear the stored record.
    pub fn reset(&mut self) {
        self.record = PreferenceRecord::default();
        self.intent = UserIntent::default();

        if let Err(e) = self.storage.remove(PREFERENCES_KEY) {
            self.warn_storage(&e.to_string());
        }

        project(&self.record, self.document.as_mut());
        self.feedback(Feedback::new(
            "Accessibility settings reset",
            CueKind::Success,
        ));
    }

    /// Play a cue with the current sound settings.
    pub fn play_cue(&self, kind: CueKind) {
        if let Some(cues) = &self.cues {
            cues.play_cue(kind, self.record.sound());
        }
    }

    /// Apply `next`, then persist, project and give feedback.
    fn commit(&mut self, next: PreferenceRecord, feedback: Feedback) {
        self.record = next;
        self.persist();
        project(&self.record, self.document.as_mut());
        self.feedback(feedback);
    }

    /// Invalid operation: state is unchanged, only feedback.
    fn reject(&self, message: &str) {
        tracing::debug!("Rejected preference change: {}", message);
        self.feedback(Feedback::new(message, CueKind::Error));
    }

    fn persist(&mut self) {
        let persisted = PersistedPreferences::from_record(&self.record, self.intent);
        let result = serde_json::to_string(&persisted)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .set(PREFERENCES_KEY, &json)
                    .map_err(|e| e.to_string())
            });

        if let Err(e) = result {
            self.warn_storage(&e);
        }
    }

    fn warn_storage(&mut self, reason: &str) {
        if !self.storage_warned {
            self.storage_warned = true;
            tracing::warn!("Preferences not saved, keeping them in memory: {}", reason);
        }
    }

    fn feedback(&self, feedback: Feedback) {
        if let (Some(announcer), Some(message)) = (&self.announcer, feedback.announcement) {
            announcer.announce(&message);
        }
        if let Some(kind) = feedback.cue {
            self.play_cue(kind);
        }
    }
}
