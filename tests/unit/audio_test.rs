//! Unit tests for the audio cue path.
//!
//! Uses a recording engine in place of the output device.

use folio::accessibility::{
    FixedSystemPreferences, InMemoryDocument, PreferencesStore, SoundSettings,
};
use folio::audio::{AudioEngine, AudioError, CueKind, CueNote, CueSynthesizer};
use folio::storage::MemoryStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingEngine {
    inits: AtomicUsize,
    notes: Mutex<Vec<CueNote>>,
    broken: bool,
}

impl AudioEngine for RecordingEngine {
    fn initialize(&self) -> Result<(), AudioError> {
        self.inits.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(AudioError::DeviceNotAvailable("test".to_string()));
        }
        Ok(())
    }

    fn play_note(&self, note: CueNote) -> Result<(), AudioError> {
        self.notes.lock().unwrap().push(note);
        Ok(())
    }
}

fn store_with(engine: Arc<RecordingEngine>) -> PreferencesStore {
    PreferencesStore::load(
        Box::new(MemoryStore::new()),
        Box::new(InMemoryDocument::new()),
        &FixedSystemPreferences::unknown(),
    )
    .with_cues(Arc::new(CueSynthesizer::new(engine)))
}

/// Nothing plays while sound is disabled.
#[test]
fn test_no_cues_while_sound_disabled() {
    let engine = Arc::new(RecordingEngine::default());
    let mut store = store_with(engine.clone());

    store.toggle_high_contrast();
    store.increase_font_scale();
    store.play_cue(CueKind::Hover);

    assert!(engine.notes.lock().unwrap().is_empty());
    assert_eq!(engine.inits.load(Ordering::SeqCst), 0);
}

/// Toggles give a success cue, continuous controls a click, invalid
/// operations an error.
#[test]
fn test_cue_kinds_follow_mutation() {
    let engine = Arc::new(RecordingEngine::default());
    let mut store = store_with(engine.clone());

    store.toggle_sound();
    store.set_sound_volume(1.0);
    for _ in 0..5 {
        store.increase_font_scale();
    }

    let frequencies: Vec<f32> = engine
        .notes
        .lock()
        .unwrap()
        .iter()
        .map(|n| n.frequency_hz)
        .collect();
    assert_eq!(
        frequencies,
        vec![1000.0, 800.0, 800.0, 800.0, 800.0, 800.0, 400.0]
    );
    assert_eq!(engine.inits.load(Ordering::SeqCst), 1);
}

/// Peak gain follows the stored volume.
#[test]
fn test_gain_follows_volume() {
    let engine = Arc::new(RecordingEngine::default());
    let synth = CueSynthesizer::new(engine.clone());

    synth.play_cue(
        CueKind::Click,
        SoundSettings {
            enabled: true,
            volume: 0.5,
        },
    );

    let notes = engine.notes.lock().unwrap();
    assert_eq!(notes.len(), 1);
    assert!((notes[0].peak_gain - 0.05).abs() < 1e-6);
}

/// A failed device stays silent and is probed once.
#[test]
fn test_unavailable_device_is_silent() {
    let engine = Arc::new(RecordingEngine {
        broken: true,
        ..Default::default()
    });
    let synth = CueSynthesizer::new(engine.clone());
    let sound = SoundSettings {
        enabled: true,
        volume: 1.0,
    };

    synth.play_cue(CueKind::Success, sound);
    synth.play_cue(CueKind::Error, sound);

    assert!(!synth.is_available());
    assert!(engine.notes.lock().unwrap().is_empty());
    assert_eq!(engine.inits.load(Ordering::SeqCst), 1);
}
