//! Shared test doubles.

use folio::storage::{KeyValueStore, StorageError};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Storage that refuses every write, like a browser over its quota. Reads can
/// be made to fail too.
#[derive(Debug, Clone, Default)]
pub struct FullStore {
    pub unavailable: bool,
    pub writes: Arc<Mutex<usize>>,
}

impl FullStore {
    pub fn write_attempts(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl KeyValueStore for FullStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        *self.writes.lock().unwrap() += 1;
        Err(StorageError::QuotaExceeded(key.to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that records formatted log lines.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = Captured::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
