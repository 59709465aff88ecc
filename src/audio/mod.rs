//! Audio cues
//!
//! Short synthesized tones used as non-speech feedback for UI events.

pub mod cues;
pub mod engine;
pub mod tones;

use thiserror::Error;

// Re-export main types
pub use cues::CueSynthesizer;
pub use engine::{AudioEngine, RodioEngine, SilentEngine};
pub use tones::{CueKind, CueNote, ToneEnvelope};

/// Errors that can occur during audio operations
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}
