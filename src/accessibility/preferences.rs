//! The accessibility and audio preference record.

use serde::{Deserialize, Serialize};

/// Base font size in pixels: even values in `[12, 24]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct FontScale(u8);

impl FontScale {
    pub const MIN: u8 = 12;
    pub const MAX: u8 = 24;
    pub const STEP: u8 = 2;
    pub const DEFAULT: FontScale = FontScale(16);

    /// Clamp `px` into range and snap it down to the nearest step.
    pub fn from_px(px: i64) -> Self {
        let clamped = px.clamp(Self::MIN as i64, Self::MAX as i64) as u8;
        Self(clamped - (clamped - Self::MIN) % Self::STEP)
    }

    /// Pixel value.
    pub fn px(self) -> u8 {
        self.0
    }

    /// One step larger, or `None` at the maximum.
    pub fn increased(self) -> Option<Self> {
        (self.0 < Self::MAX).then(|| Self(self.0 + Self::STEP))
    }

    /// One step smaller, or `None` at the minimum.
    pub fn decreased(self) -> Option<Self> {
        (self.0 > Self::MIN).then(|| Self(self.0 - Self::STEP))
    }

    /// Every allowed value, smallest first.
    pub fn all() -> impl Iterator<Item = FontScale> {
        (Self::MIN..=Self::MAX).step_by(Self::STEP as usize).map(FontScale)
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for FontScale {
    type Error = std::convert::Infallible;

    fn try_from(px: i64) -> Result<Self, Self::Error> {
        Ok(Self::from_px(px))
    }
}

impl From<FontScale> for u8 {
    fn from(scale: FontScale) -> Self {
        scale.0
    }
}

impl std::fmt::Display for FontScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Clamp a volume into `[0, 1]`. Returns `None` for NaN.
pub fn clamp_volume(volume: f64) -> Option<f64> {
    (!volume.is_nan()).then(|| volume.clamp(0.0, 1.0))
}

/// Boolean preferences. Each one projects to a presence-only attribute on the
/// document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceFlag {
    HighContrast,
    ReducedMotion,
    LargeText,
    FocusIndicators,
    KeyboardNavigation,
    ScreenReaderMode,
    SoundEnabled,
}

impl PreferenceFlag {
    /// Every flag, in projection order.
    pub fn all() -> &'static [PreferenceFlag] {
        &[
            PreferenceFlag::HighContrast,
            PreferenceFlag::ReducedMotion,
            PreferenceFlag::LargeText,
            PreferenceFlag::FocusIndicators,
            PreferenceFlag::KeyboardNavigation,
            PreferenceFlag::ScreenReaderMode,
            PreferenceFlag::SoundEnabled,
        ]
    }

    /// Document-root attribute. Stable: the stylesheet selects on these.
    pub fn attribute(self) -> &'static str {
        match self {
            PreferenceFlag::HighContrast => "data-high-contrast",
            PreferenceFlag::ReducedMotion => "data-reduced-motion",
            PreferenceFlag::LargeText => "data-large-text",
            PreferenceFlag::FocusIndicators => "data-focus-indicators",
            PreferenceFlag::KeyboardNavigation => "data-keyboard-navigation",
            PreferenceFlag::ScreenReaderMode => "data-screen-reader",
            PreferenceFlag::SoundEnabled => "data-sound",
        }
    }

    /// Human label used in announcements.
    pub fn label(self) -> &'static str {
        match self {
            PreferenceFlag::HighContrast => "High contrast",
            PreferenceFlag::ReducedMotion => "Reduced motion",
            PreferenceFlag::LargeText => "Large text",
            PreferenceFlag::FocusIndicators => "Focus indicators",
            PreferenceFlag::KeyboardNavigation => "Keyboard navigation",
            PreferenceFlag::ScreenReaderMode => "Screen reader mode",
            PreferenceFlag::SoundEnabled => "Sound effects",
        }
    }
}

/// Full preference record. Always complete; invariants hold for every value
/// produced by the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    /// Base font size
    pub font_scale: FontScale,
    pub high_contrast: bool,
    pub reduced_motion: bool,
    pub large_text: bool,
    pub focus_indicators: bool,
    pub keyboard_navigation: bool,
    pub screen_reader_mode: bool,
    pub sound_enabled: bool,
    /// Cue volume in `[0, 1]`
    pub sound_volume: f64,
}

impl Default for PreferenceRecord {
    fn default() -> Self {
        Self {
            font_scale: FontScale::DEFAULT,
            high_contrast: false,
            reduced_motion: false,
            large_text: false,
            focus_indicators: true,
            keyboard_navigation: true,
            screen_reader_mode: false,
            sound_enabled: false,
            sound_volume: 0.5,
        }
    }
}

impl PreferenceRecord {
    /// Value of a boolean preference.
    pub fn flag(&self, flag: PreferenceFlag) -> bool {
        match flag {
            PreferenceFlag::HighContrast => self.high_contrast,
            PreferenceFlag::ReducedMotion => self.reduced_motion,
            PreferenceFlag::LargeText => self.large_text,
            PreferenceFlag::FocusIndicators => self.focus_indicators,
            PreferenceFlag::KeyboardNavigation => self.keyboard_navigation,
            PreferenceFlag::ScreenReaderMode => self.screen_reader_mode,
            PreferenceFlag::SoundEnabled => self.sound_enabled,
        }
    }

    /// Copy of this record with `flag` flipped.
    pub fn toggled(mut self, flag: PreferenceFlag) -> Self {
        let slot = match flag {
            PreferenceFlag::HighContrast => &mut self.high_contrast,
            PreferenceFlag::ReducedMotion => &mut self.reduced_motion,
            PreferenceFlag::LargeText => &mut self.large_text,
            PreferenceFlag::FocusIndicators => &mut self.focus_indicators,
            PreferenceFlag::KeyboardNavigation => &mut self.keyboard_navigation,
            PreferenceFlag::ScreenReaderMode => &mut self.screen_reader_mode,
            PreferenceFlag::SoundEnabled => &mut self.sound_enabled,
        };
        *slot = !*slot;
        self
    }

    /// Sound settings consumed by the cue synthesizer.
    pub fn sound(&self) -> SoundSettings {
        SoundSettings {
            enabled: self.sound_enabled,
            volume: self.sound_volume,
        }
    }
}

/// The slice of the record the synthesizer needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundSettings {
    pub enabled: bool,
    pub volume: f64,
}

impl Default for SoundSettings {
    fn default() -> Self {
        PreferenceRecord::default().sound()
    }
}

/// Stored form of the record. Every field is optional: missing fields keep
/// their default and unknown fields are ignored.
///
/// `reduced_motion` and `high_contrast` are only written once the user has
/// chosen a value, so the OS hint keeps applying until then.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_scale: Option<FontScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_contrast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduced_motion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_text: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_indicators: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard_navigation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_reader_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_volume: Option<f64>,
}

impl PersistedPreferences {
    /// Stored form of `record`. OS-hinted fields are kept only where `intent`
    /// says the user has set them.
    pub fn from_record(record: &PreferenceRecord, intent: UserIntent) -> Self {
        Self {
            font_scale: Some(record.font_scale),
            high_contrast: intent.high_contrast.then_some(record.high_contrast),
            reduced_motion: intent.reduced_motion.then_some(record.reduced_motion),
            large_text: Some(record.large_text),
            focus_indicators: Some(record.focus_indicators),
            keyboard_navigation: Some(record.keyboard_navigation),
            screen_reader_mode: Some(record.screen_reader_mode),
            sound_enabled: Some(record.sound_enabled),
            sound_volume: Some(record.sound_volume),
        }
    }

    /// Overlay the stored fields onto `base`.
    pub fn overlay(&self, base: PreferenceRecord) -> PreferenceRecord {
        PreferenceRecord {
            font_scale: self.font_scale.unwrap_or(base.font_scale),
            high_contrast: self.high_contrast.unwrap_or(base.high_contrast),
            reduced_motion: self.reduced_motion.unwrap_or(base.reduced_motion),
            large_text: self.large_text.unwrap_or(base.large_text),
            focus_indicators: self.focus_indicators.unwrap_or(base.focus_indicators),
            keyboard_navigation: self.keyboard_navigation.unwrap_or(base.keyboard_navigation),
            screen_reader_mode: self.screen_reader_mode.unwrap_or(base.screen_reader_mode),
            sound_enabled: self.sound_enabled.unwrap_or(base.sound_enabled),
            sound_volume: self
                .sound_volume
                .and_then(clamp_volume)
                .unwrap_or(base.sound_volume),
        }
    }

    /// Which OS-hinted fields carry a stored user choice.
    pub fn intent(&self) -> UserIntent {
        UserIntent {
            reduced_motion: self.reduced_motion.is_some(),
            high_contrast: self.high_contrast.is_some(),
        }
    }
}

/// Whether the user has expressed a choice for the OS-hinted fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserIntent {
    pub reduced_motion: bool,
    pub high_contrast: bool,
}

impl UserIntent {
    /// Record that the user changed `flag`.
    pub fn note(&mut self, flag: PreferenceFlag) {
        match flag {
            PreferenceFlag::ReducedMotion => self.reduced_motion = true,
            PreferenceFlag::HighContrast => self.high_contrast = true,
            _ => {}
        }
    }
}
