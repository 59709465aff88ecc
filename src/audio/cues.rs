//! Cue synthesizer: the single entry point presentation code uses for
//! auditory feedback.

use super::engine::AudioEngine;
use super::tones::CueKind;
use crate::accessibility::preferences::SoundSettings;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Plays UI cues through an [`AudioEngine`].
///
/// The engine is initialized on the first audible cue. If that fails the
/// synthesizer stays silent for the rest of the process and warns once.
pub struct CueSynthesizer {
    engine: Arc<dyn AudioEngine>,
    available: OnceLock<bool>,
    warned: AtomicBool,
}

impl CueSynthesizer {
    pub fn new(engine: Arc<dyn AudioEngine>) -> Self {
        Self {
            engine,
            available: OnceLock::new(),
            warned: AtomicBool::new(false),
        }
    }

    /// Play `kind` with the given sound settings. Fire-and-forget: a no-op
    /// when sound is disabled or audio is unavailable.
    pub fn play_cue(&self, kind: CueKind, sound: SoundSettings) {
        if !sound.enabled {
            return;
        }

        if !self.is_available() {
            return;
        }

        let note = kind.note(sound.volume);
        match self.engine.play_note(note) {
            Ok(()) => tracing::debug!("Playing {} cue at gain {:.3}", kind, note.peak_gain),
            Err(e) => self.warn_once(&e.to_string()),
        }
    }

    /// Whether the engine initialized. Initializes on first call.
    pub fn is_available(&self) -> bool {
        *self.available.get_or_init(|| match self.engine.initialize() {
            Ok(()) => true,
            Err(e) => {
                self.warn_once(&e.to_string());
                false
            }
        })
    }

    fn warn_once(&self, reason: &str) {
        if !self.warned.swap(true, Ordering::Relaxed) {
            tracing::warn!("Audio cues unavailable: {}", reason);
        }
    }
}
