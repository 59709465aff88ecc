//! Audio Engine
//!
//! Output backends for synthesized cues.

use super::tones::CueNote;
use super::AudioError;
use rodio::OutputStream;
use std::sync::mpsc::{self, Sender};
use std::sync::OnceLock;

/// Trait for audio engine implementations
pub trait AudioEngine: Send + Sync {
    /// Open the output device. Called once, lazily, before the first cue.
    fn initialize(&self) -> Result<(), AudioError>;

    /// Start playing a note. Returns once playback is scheduled; the note runs
    /// to completion on its own.
    fn play_note(&self, note: CueNote) -> Result<(), AudioError>;
}

/// Default audio engine using rodio.
///
/// `initialize` opens the output stream on a dedicated `folio-audio` thread,
/// which owns it for the life of the engine. Cues are sent to that thread and
/// mixed by rodio, so overlapping cues play together.
#[derive(Debug, Default)]
pub struct RodioEngine {
    output: OnceLock<Sender<CueNote>>,
}

impl RodioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn open_output() -> Result<Sender<CueNote>, AudioError> {
        let (notes_tx, notes_rx) = mpsc::channel::<CueNote>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        std::thread::Builder::new()
            .name("folio-audio".to_string())
            .spawn(move || {
                // The stream stops when dropped, so it lives on this thread.
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(output) => output,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));

                for note in notes_rx {
                    if let Err(e) = handle.play_raw(note.envelope()) {
                        tracing::debug!("Cue dropped: {}", e);
                    }
                }
                tracing::debug!("Audio output closed");
            })
            .map_err(|e| AudioError::DeviceNotAvailable(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(notes_tx),
            Ok(Err(reason)) => Err(AudioError::DeviceNotAvailable(reason)),
            Err(_) => Err(AudioError::DeviceNotAvailable(
                "audio thread exited".to_string(),
            )),
        }
    }
}

impl AudioEngine for RodioEngine {
    fn initialize(&self) -> Result<(), AudioError> {
        if self.output.get().is_some() {
            return Ok(());
        }

        tracing::info!("Initializing audio engine");
        let sender = Self::open_output()?;
        // A concurrent initialize may have won; its thread keeps the stream.
        let _ = self.output.set(sender);
        Ok(())
    }

    fn play_note(&self, note: CueNote) -> Result<(), AudioError> {
        let output = self.output.get().ok_or_else(|| {
            AudioError::DeviceNotAvailable("audio engine not initialized".to_string())
        })?;

        output
            .send(note)
            .map_err(|_| AudioError::PlaybackFailed("audio thread stopped".to_string()))
    }
}

/// Engine for environments without audio output. Never initializes.
#[derive(Debug, Default)]
pub struct SilentEngine;

impl AudioEngine for SilentEngine {
    fn initialize(&self) -> Result<(), AudioError> {
        Err(AudioError::DeviceNotAvailable(
            "audio output disabled".to_string(),
        ))
    }

    fn play_note(&self, _note: CueNote) -> Result<(), AudioError> {
        Err(AudioError::DeviceNotAvailable(
            "audio output disabled".to_string(),
        ))
    }
}
