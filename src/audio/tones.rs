//! Tone table and envelope for UI cues.
//!
//! A cue is one sine note whose gain starts at `0.1 × volume` and decays
//! exponentially to a tenth of that peak over the note's duration.

use rodio::Source;
use std::time::Duration;

/// Peak gain at full volume.
pub const PEAK_GAIN_SCALE: f32 = 0.1;

/// Gain the envelope decays to at full volume.
pub const ENVELOPE_FLOOR: f32 = 0.01;

/// End gain as a fraction of the peak.
const DECAY_RATIO: f32 = ENVELOPE_FLOOR / PEAK_GAIN_SCALE;

/// Output sample rate for synthesized cues.
pub const SAMPLE_RATE: u32 = 44_100;

/// UI events that have a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKind {
    /// Continuous controls (font size, volume)
    Click,
    Hover,
    /// Toggles
    Success,
    /// Invalid operations
    Error,
}

impl CueKind {
    /// Note frequency in Hz.
    pub fn frequency_hz(self) -> f32 {
        match self {
            CueKind::Click => 800.0,
            CueKind::Hover => 600.0,
            CueKind::Success => 1000.0,
            CueKind::Error => 400.0,
        }
    }

    /// Note length.
    pub fn duration(self) -> Duration {
        match self {
            CueKind::Click => Duration::from_millis(100),
            CueKind::Hover => Duration::from_millis(50),
            CueKind::Success => Duration::from_millis(200),
            CueKind::Error => Duration::from_millis(300),
        }
    }

    /// The note to play at `volume` (clamped to `[0, 1]`).
    pub fn note(self, volume: f64) -> CueNote {
        let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        CueNote {
            frequency_hz: self.frequency_hz(),
            duration: self.duration(),
            peak_gain: PEAK_GAIN_SCALE * volume as f32,
        }
    }
}

impl std::fmt::Display for CueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CueKind::Click => "click",
            CueKind::Hover => "hover",
            CueKind::Success => "success",
            CueKind::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// A single note ready to synthesize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueNote {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub peak_gain: f32,
}

impl CueNote {
    /// Sample source for this note.
    pub fn envelope(&self) -> ToneEnvelope {
        ToneEnvelope::new(*self, SAMPLE_RATE)
    }
}

/// Mono sine source with an exponential gain envelope. Ends after the note's
/// duration, which stops the oscillator.
#[derive(Debug, Clone)]
pub struct ToneEnvelope {
    phase_step: f32,
    sample_rate: u32,
    total_samples: u64,
    index: u64,
    gain: f32,
    decay: f32,
    duration: Duration,
}

impl ToneEnvelope {
    pub fn new(note: CueNote, sample_rate: u32) -> Self {
        let total_samples = (note.duration.as_secs_f64() * sample_rate as f64).round() as u64;
        let peak = note.peak_gain.max(0.0);

        // The end gain scales with the peak, so quiet cues fade the same way.
        let decay = if peak > 0.0 && total_samples > 0 {
            DECAY_RATIO.powf(1.0 / total_samples as f32)
        } else {
            1.0
        };

        Self {
            phase_step: std::f32::consts::TAU * note.frequency_hz / sample_rate as f32,
            sample_rate,
            total_samples,
            index: 0,
            gain: peak,
            decay,
            duration: note.duration,
        }
    }

    /// Gain applied to the next sample.
    pub fn current_gain(&self) -> f32 {
        self.gain
    }
}

impl Iterator for ToneEnvelope {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.index >= self.total_samples {
            return None;
        }

        let sample = (self.phase_step * self.index as f32).sin() * self.gain;
        self.index += 1;
        self.gain *= self.decay;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total_samples - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl Source for ToneEnvelope {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.total_samples - self.index) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.duration)
    }
}
