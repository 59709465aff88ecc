//! Application context.
//!
//! Bundles the client-side singletons (preferences, locale, announcer, cue
//! synthesizer) and hands out scoped accessors. Each accessor exposes an
//! immutable snapshot plus the owning store's typed mutators; nothing else can
//! reach the stores.

use crate::accessibility::{
    Announcer, DocumentRoot, EnvSystemPreferences, PreferenceRecord, PreferencesStore,
    ScreenReaderSupport, SystemPreferences,
};
use crate::audio::{AudioEngine, CueSynthesizer, RodioEngine};
use crate::i18n::{LocaleStore, LocaleTag};
use crate::storage::local::default_storage_path;
use crate::storage::{FileStore, KeyValueStore};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// Accessor for the preferences store.
#[derive(Clone)]
pub struct PreferencesHandle {
    store: Arc<Mutex<PreferencesStore>>,
}

impl PreferencesHandle {
    /// Current record.
    pub fn snapshot(&self) -> PreferenceRecord {
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record()
    }

    /// Run mutators against the store. Mutations are applied in call order.
    pub fn update<R>(&self, f: impl FnOnce(&mut PreferencesStore) -> R) -> R {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

/// Accessor for the locale store.
#[derive(Clone)]
pub struct LocaleHandle {
    store: Arc<Mutex<LocaleStore>>,
}

impl LocaleHandle {
    pub fn current_tag(&self) -> LocaleTag {
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current_tag()
    }

    /// Switch language; see [`LocaleStore::set_tag`].
    pub fn set_tag(&self, tag: &str) -> bool {
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_tag(tag)
    }

    /// Translate a message by key.
    pub fn t(&self, key: &str) -> String {
        self.store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .t(key)
    }
}

/// The client runtime for one document.
pub struct AppContext {
    preferences: PreferencesHandle,
    locale: LocaleHandle,
    announcer: Arc<Announcer>,
    cues: Arc<CueSynthesizer>,
}

impl AppContext {
    /// Build the context. `storage` is cloned for each store; the stores use
    /// separate keys.
    pub fn new<S>(
        storage: S,
        document: Box<dyn DocumentRoot>,
        hints: &dyn SystemPreferences,
        announcer: Arc<Announcer>,
        engine: Arc<dyn AudioEngine>,
    ) -> Self
    where
        S: KeyValueStore + Clone + 'static,
    {
        let cues = Arc::new(CueSynthesizer::new(engine));
        let preferences = PreferencesStore::load(Box::new(storage.clone()), document, hints)
            .with_announcer(announcer.clone() as Arc<dyn ScreenReaderSupport>)
            .with_cues(cues.clone());
        let locale = LocaleStore::load(Box::new(storage));

        Self {
            preferences: PreferencesHandle {
                store: Arc::new(Mutex::new(preferences)),
            },
            locale: LocaleHandle {
                store: Arc::new(Mutex::new(locale)),
            },
            announcer,
            cues,
        }
    }

    /// Context for a native host: file storage in the data directory, rodio
    /// output, OS hints from the environment.
    pub fn open_default(document: Box<dyn DocumentRoot>) -> Self {
        Self::open_at(default_storage_path(), document)
    }

    /// Native host context with local storage at `path`. An unreadable file
    /// starts every store from defaults.
    pub fn open_at(path: impl Into<PathBuf>, document: Box<dyn DocumentRoot>) -> Self {
        let storage = FileStore::open(path);
        tracing::info!("Using local storage at {}", storage.path().display());

        Self::new(
            storage,
            document,
            &EnvSystemPreferences,
            Arc::new(Announcer::new()),
            Arc::new(RodioEngine::new()),
        )
    }

    pub fn preferences(&self) -> PreferencesHandle {
        self.preferences.clone()
    }

    pub fn locale(&self) -> LocaleHandle {
        self.locale.clone()
    }

    pub fn announcer(&self) -> Arc<Announcer> {
        self.announcer.clone()
    }

    pub fn cues(&self) -> Arc<CueSynthesizer> {
        self.cues.clone()
    }
}
