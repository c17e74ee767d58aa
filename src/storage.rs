use crate::errors::StoreError;
use crate::models::{LogEntry, Session, is_allowed_minutes};
use serde_json::Value;
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Mutex,
    sync::atomic::{AtomicUsize, Ordering},
};
use tracing::{debug, warn};

pub const STATE_FILE_NAME: &str = "habitfire_state_v1.json";

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Session;

    fn save(&self, session: &Session);
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    Path::new("data").join(STATE_FILE_NAME)
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_save(&self, session: &Session) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(session)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Session {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Session::default(),
            Err(err) => {
                warn!("failed to read {}: {err}", self.path.display());
                return Session::default();
            }
        };

        match decode_session(&bytes) {
            Ok(session) => {
                debug!(logs = session.logs.len(), "restored session");
                session
            }
            Err(err) => {
                warn!("ignoring stored state in {}: {err}", self.path.display());
                Session::default()
            }
        }
    }

    fn save(&self, session: &Session) {
        if let Err(err) = self.try_save(session) {
            warn!("failed to persist state to {}: {err}", self.path.display());
        }
    }
}

pub fn decode_session(bytes: &[u8]) -> Result<Session, StoreError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let Value::Object(mut record) = value else {
        return Err(StoreError::Shape("record is not an object"));
    };

    let username = match record.remove("username") {
        Some(Value::String(name)) if !name.is_empty() => Some(name),
        _ => None,
    };

    let logs = match record.remove("logs") {
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match decode_entry(item) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("skipping stored log #{index}: {err}");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(Session { username, logs })
}

fn decode_entry(item: Value) -> Result<LogEntry, StoreError> {
    let entry: LogEntry = serde_json::from_value(item)?;
    if !is_allowed_minutes(entry.minutes) {
        return Err(StoreError::Shape("minutes outside the allowed set"));
    }
    Ok(entry)
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Vec<u8>>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn raw(&self) -> Option<Vec<u8>> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Session {
        match self.raw() {
            Some(bytes) => decode_session(&bytes).unwrap_or_else(|err| {
                warn!("ignoring stored state: {err}");
                Session::default()
            }),
            None => Session::default(),
        }
    }

    fn save(&self, session: &Session) {
        match serde_json::to_vec(session) {
            Ok(bytes) => {
                *self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(bytes);
                self.saves.fetch_add(1, Ordering::SeqCst);
            }
            Err(err) => warn!("failed to encode state: {err}"),
        }
    }
}

impl<T: SessionStore + ?Sized> SessionStore for std::sync::Arc<T> {
    fn load(&self) -> Session {
        (**self).load()
    }

    fn save(&self, session: &Session) {
        (**self).save(session)
    }
}
