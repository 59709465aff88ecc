//! Unit tests for the preferences store.
//!
//! Covers clamping, persistence across sessions, reset, document projection
//! and OS hints.

use crate::support::{capture_logs, FullStore};
use folio::accessibility::{
    Announcer, FixedSystemPreferences, FontScale, InMemoryDocument, ManualClock, PreferenceFlag,
    PreferenceRecord, PreferencesStore, PREFERENCES_KEY,
};
use folio::storage::MemoryStore;
use std::sync::Arc;

fn load_with(storage: &MemoryStore, document: &InMemoryDocument) -> PreferencesStore {
    PreferencesStore::load(
        Box::new(storage.clone()),
        Box::new(document.clone()),
        &FixedSystemPreferences::unknown(),
    )
}

fn load(storage: &MemoryStore) -> PreferencesStore {
    load_with(storage, &InMemoryDocument::new())
}

/// Small deterministic generator for operation sequences.
fn sequence(seed: u64, len: usize) -> Vec<u64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            state >> 33
        })
        .collect()
}

/// Font scale stays on the allowed grid for any increase/decrease sequence.
#[test]
fn test_font_scale_stays_on_grid() {
    let allowed: Vec<u8> = FontScale::all().map(FontScale::px).collect();
    assert_eq!(allowed, vec![12, 14, 16, 18, 20, 22, 24]);

    for seed in 0..20 {
        let mut store = load(&MemoryStore::new());
        for step in sequence(seed, 60) {
            if step % 2 == 0 {
                store.increase_font_scale();
            } else {
                store.decrease_font_scale();
            }
            assert!(allowed.contains(&store.record().font_scale.px()));
        }
    }
}

/// Ten decreases from defaults stop at the minimum.
#[test]
fn test_decrease_clamps_at_minimum() {
    let mut store = load(&MemoryStore::new());

    for _ in 0..10 {
        store.decrease_font_scale();
    }
    assert_eq!(store.record().font_scale.px(), 12);

    store.decrease_font_scale();
    assert_eq!(store.record().font_scale.px(), 12);
}

/// Increase clamps at the maximum.
#[test]
fn test_increase_clamps_at_maximum() {
    let mut store = load(&MemoryStore::new());
    for _ in 0..10 {
        store.increase_font_scale();
    }
    assert_eq!(store.record().font_scale.px(), 24);
}

/// Stored volume is the input clamped into [0, 1].
#[test]
fn test_sound_volume_is_clamped() {
    let mut store = load(&MemoryStore::new());

    for (input, expected) in [
        (0.3, 0.3),
        (-2.0, 0.0),
        (1.7, 1.0),
        (0.0, 0.0),
        (1.0, 1.0),
        (f64::INFINITY, 1.0),
        (f64::NEG_INFINITY, 0.0),
    ] {
        store.set_sound_volume(input);
        assert_eq!(store.record().sound_volume, expected, "input {}", input);
    }
}

/// NaN leaves the volume unchanged.
#[test]
fn test_nan_volume_is_ignored() {
    let mut store = load(&MemoryStore::new());
    store.set_sound_volume(0.8);
    store.set_sound_volume(f64::NAN);
    assert_eq!(store.record().sound_volume, 0.8);
}

/// Toggling any flag twice restores the starting record.
#[test]
fn test_toggle_is_involution() {
    let mut store = load(&MemoryStore::new());
    store.increase_font_scale();
    let start = store.record();

    for &flag in PreferenceFlag::all() {
        store.toggle(flag);
        assert_ne!(store.record(), start, "{:?} did not change", flag);
        store.toggle(flag);
        assert_eq!(store.record(), start, "{:?} is not an involution", flag);
    }
}

/// Named toggles flip the matching field.
#[test]
fn test_named_toggles() {
    let mut store = load(&MemoryStore::new());

    store.toggle_high_contrast();
    store.toggle_reduced_motion();
    store.toggle_large_text();
    store.toggle_focus_indicators();
    store.toggle_keyboard_navigation();
    store.toggle_screen_reader_mode();
    store.toggle_sound();

    let record = store.record();
    assert!(record.high_contrast);
    assert!(record.reduced_motion);
    assert!(record.large_text);
    assert!(!record.focus_indicators);
    assert!(!record.keyboard_navigation);
    assert!(record.screen_reader_mode);
    assert!(record.sound_enabled);
}

/// Document attributes track the record after every mutation.
#[test]
fn test_projection_matches_record() {
    let document = InMemoryDocument::new();
    let mut store = load_with(&MemoryStore::new(), &document);

    for step in sequence(7, 40) {
        match step % 5 {
            0 => store.increase_font_scale(),
            1 => store.decrease_font_scale(),
            2 => store.set_sound_volume((step % 11) as f64 / 10.0),
            _ => {
                let flags = PreferenceFlag::all();
                store.toggle(flags[(step as usize) % flags.len()]);
            }
        }

        let record = store.record();
        for &flag in PreferenceFlag::all() {
            assert_eq!(
                document.has_attribute(flag.attribute()),
                record.flag(flag),
                "{} out of sync",
                flag.attribute()
            );
        }
        let px = format!("{}px", record.font_scale.px());
        assert_eq!(
            document.style_property("--font-size-base").as_deref(),
            Some(px.as_str())
        );
    }
}

/// Reset leaves only the default-on attributes.
#[test]
fn test_reset_clears_optional_attributes() {
    let document = InMemoryDocument::new();
    let mut store = load_with(&MemoryStore::new(), &document);

    store.toggle_high_contrast();
    store.toggle_large_text();
    store.toggle_screen_reader_mode();
    store.toggle_sound();
    store.toggle_reduced_motion();
    store.reset();

    assert_eq!(
        document.attribute_names(),
        vec!["data-focus-indicators", "data-keyboard-navigation"]
    );
    assert_eq!(
        document.render_root_attributes(),
        "data-focus-indicators data-keyboard-navigation style=\"--font-size-base: 16px; font-size: 16px\""
    );
}

/// Reloading after any mutation yields the same record.
#[test]
fn test_reload_yields_identical_record() {
    let storage = MemoryStore::new();
    let mut store = load(&storage);

    for step in sequence(3, 30) {
        match step % 4 {
            0 => store.increase_font_scale(),
            1 => store.set_sound_volume((step % 7) as f64 / 7.0),
            _ => {
                let flags = PreferenceFlag::all();
                store.toggle(flags[(step as usize) % flags.len()]);
            }
        }
        assert_eq!(load(&storage).record(), store.record());
    }
}

/// Persist, reload and reset.
#[test]
fn test_persist_reload_and_reset() {
    let storage = MemoryStore::new();
    let mut store = load(&storage);

    store.toggle_high_contrast();
    store.set_sound_volume(0.3);

    let reloaded = load(&storage).record();
    assert_eq!(
        reloaded,
        PreferenceRecord {
            high_contrast: true,
            sound_volume: 0.3,
            ..PreferenceRecord::default()
        }
    );

    let mut store = load(&storage);
    store.reset();
    assert_eq!(store.record(), PreferenceRecord::default());
    assert_eq!(storage.raw(PREFERENCES_KEY), None);
    assert_eq!(load(&storage).record(), PreferenceRecord::default());
}

/// Malformed stored JSON falls back to defaults.
#[test]
fn test_malformed_storage_uses_defaults() {
    use folio::storage::KeyValueStore;

    let mut storage = MemoryStore::new();
    storage.set(PREFERENCES_KEY, "{not json").unwrap();
    assert_eq!(load(&storage).record(), PreferenceRecord::default());

    storage
        .set(PREFERENCES_KEY, r#"{"highContrast":"yes"}"#)
        .unwrap();
    assert_eq!(load(&storage).record(), PreferenceRecord::default());
}

/// Partial stored records are merged over defaults.
#[test]
fn test_partial_storage_is_merged() {
    use folio::storage::KeyValueStore;

    let mut storage = MemoryStore::new();
    storage
        .set(PREFERENCES_KEY, r#"{"largeText":true,"fontScale":19}"#)
        .unwrap();

    let record = load(&storage).record();
    assert!(record.large_text);
    assert_eq!(record.font_scale.px(), 18);
    assert!(record.focus_indicators);
    assert_eq!(record.sound_volume, 0.5);
}

/// OS reduced-motion hint applies until the user overrides it.
#[test]
fn test_os_hint_until_user_override() {
    let storage = MemoryStore::new();
    let hints = FixedSystemPreferences::unknown().with_reduced_motion(true);
    let open = || {
        PreferencesStore::load(
            Box::new(storage.clone()),
            Box::new(InMemoryDocument::new()),
            &hints,
        )
    };

    let mut store = open();
    assert!(store.record().reduced_motion);

    store.toggle_reduced_motion();
    assert!(!store.record().reduced_motion);

    assert!(!open().record().reduced_motion);
}

/// Unrelated mutations do not freeze the OS hint.
#[test]
fn test_unrelated_change_keeps_following_hint() {
    let storage = MemoryStore::new();
    let open = |contrast: bool| {
        PreferencesStore::load(
            Box::new(storage.clone()),
            Box::new(InMemoryDocument::new()),
            &FixedSystemPreferences::unknown().with_more_contrast(contrast),
        )
    };

    let mut store = open(true);
    assert!(store.record().high_contrast);
    store.increase_font_scale();

    let store = open(false);
    assert!(!store.record().high_contrast);
    assert_eq!(store.record().font_scale.px(), 18);
}

/// Mutations announce their new state.
#[test]
fn test_mutations_announce() {
    let announcer = Arc::new(Announcer::with_clock(Arc::new(ManualClock::new())));
    let mut store = load(&MemoryStore::new()).with_announcer(announcer.clone());

    store.toggle_high_contrast();
    assert_eq!(announcer.live_region().content(), "High contrast enabled");

    store.toggle_high_contrast();
    assert_eq!(announcer.live_region().content(), "High contrast disabled");

    store.increase_font_scale();
    assert_eq!(announcer.live_region().content(), "Font size 18 pixels");

    for _ in 0..5 {
        store.increase_font_scale();
    }
    assert_eq!(
        announcer.live_region().content(),
        "Font size is already at its maximum"
    );

    store.reset();
    assert_eq!(
        announcer.live_region().content(),
        "Accessibility settings reset"
    );
}

/// A full storage keeps changes in memory and warns once.
#[test]
fn test_write_failure_keeps_changes_in_memory() {
    let storage = FullStore::default();
    let document = InMemoryDocument::new();

    let (store, logs) = capture_logs(|| {
        let mut store = PreferencesStore::load(
            Box::new(storage.clone()),
            Box::new(document.clone()),
            &FixedSystemPreferences::unknown(),
        );
        store.toggle_high_contrast();
        store.increase_font_scale();
        store.set_sound_volume(0.2);
        store
    });

    let record = store.record();
    assert!(record.high_contrast);
    assert_eq!(record.font_scale.px(), 18);
    assert_eq!(record.sound_volume, 0.2);
    assert!(document.has_attribute("data-high-contrast"));
    assert_eq!(
        document.style_property("--font-size-base").as_deref(),
        Some("18px")
    );

    assert!(store.persistence_failed());
    assert_eq!(storage.write_attempts(), 3);
    assert_eq!(logs.matches("Preferences not saved").count(), 1);
}

/// Unreadable storage at boot gives defaults.
#[test]
fn test_read_failure_uses_defaults() {
    let storage = FullStore {
        unavailable: true,
        ..Default::default()
    };
    let store = PreferencesStore::load(
        Box::new(storage),
        Box::new(InMemoryDocument::new()),
        &FixedSystemPreferences::unknown(),
    );

    assert_eq!(store.record(), PreferenceRecord::default());
    assert!(!store.persistence_failed());
}
