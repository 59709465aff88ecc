//! Operating-system accessibility hints.
//!
//! Read once when the preferences store loads, and only for fields the user
//! has never set.

/// Source of OS-level preference hints (the `prefers-reduced-motion` and
/// `prefers-contrast: more` media queries in a browser).
pub trait SystemPreferences {
    /// Whether the OS asks for reduced motion. `None` when unknown.
    fn prefers_reduced_motion(&self) -> Option<bool>;

    /// Whether the OS asks for increased contrast. `None` when unknown.
    fn prefers_more_contrast(&self) -> Option<bool>;
}

/// Hints fixed at construction (hosts that query the platform themselves, and
/// tests).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedSystemPreferences {
    pub reduced_motion: Option<bool>,
    pub more_contrast: Option<bool>,
}

impl FixedSystemPreferences {
    /// No hints available.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn with_reduced_motion(mut self, value: bool) -> Self {
        self.reduced_motion = Some(value);
        self
    }

    pub fn with_more_contrast(mut self, value: bool) -> Self {
        self.more_contrast = Some(value);
        self
    }
}

impl SystemPreferences for FixedSystemPreferences {
    fn prefers_reduced_motion(&self) -> Option<bool> {
        self.reduced_motion
    }

    fn prefers_more_contrast(&self) -> Option<bool> {
        self.more_contrast
    }
}

/// Hints taken from environment variables, for native hosts.
///
/// `FOLIO_REDUCED_MOTION` and `FOLIO_HIGH_CONTRAST` accept `1`/`true`/`yes`
/// and `0`/`false`/`no`; anything else is treated as unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSystemPreferences;

impl EnvSystemPreferences {
    fn read(var: &str) -> Option<bool> {
        let value = std::env::var(var).ok()?;
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        }
    }
}

impl SystemPreferences for EnvSystemPreferences {
    fn prefers_reduced_motion(&self) -> Option<bool> {
        Self::read("FOLIO_REDUCED_MOTION")
    }

    fn prefers_more_contrast(&self) -> Option<bool> {
        Self::read("FOLIO_HIGH_CONTRAST")
    }
}
