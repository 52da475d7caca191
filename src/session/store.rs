use super::PlayerRecord;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

const RECORD_FILE: &str = "player_info.json";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    #[error("record store i/o failed for '{user}': {reason}")]
    Io { user: String, reason: String },
    #[error("record for '{user}' is corrupted: {reason}")]
    Corrupted { user: String, reason: String },
    #[error("'{0}' cannot be used as a user id")]
    InvalidUser(String),
}

/// Where player records live, keyed by user id.
pub trait RecordStore {
    /// `Ok(None)` when the user has no record yet.
    fn load(&self, user: &str) -> Result<Option<PlayerRecord>, StoreError>;
    fn save(&mut self, user: &str, record: &PlayerRecord) -> Result<(), StoreError>;
    fn users(&self) -> Result<Vec<String>, StoreError>;
}

fn decode(user: &str, raw: &str) -> Result<PlayerRecord, StoreError> {
    PlayerRecord::from_json(raw)
        .map_err(|e| StoreError::Corrupted { user: user.to_string(), reason: e.to_string() })
}

fn encode(user: &str, record: &PlayerRecord) -> Result<String, StoreError> {
    record
        .to_json()
        .map_err(|e| StoreError::Io { user: user.to_string(), reason: e.to_string() })
}

/// Records held as JSON strings in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text for `user`, valid JSON or not.
    pub fn insert_raw(&mut self, user: impl Into<String>, raw: impl Into<String>) {
        self.records.insert(user.into(), raw.into());
    }

    pub fn raw(&self, user: &str) -> Option<&str> {
        self.records.get(user).map(String::as_str)
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, user: &str) -> Result<Option<PlayerRecord>, StoreError> {
        self.records.get(user).map(|raw| decode(user, raw)).transpose()
    }

    fn save(&mut self, user: &str, record: &PlayerRecord) -> Result<(), StoreError> {
        let raw = encode(user, record)?;
        self.records.insert(user.to_string(), raw);
        Ok(())
    }

    fn users(&self) -> Result<Vec<String>, StoreError> {
        let mut users: Vec<String> = self.records.keys().cloned().collect();
        users.sort();
        Ok(users)
    }
}

/// One `<dir>/<user>/player_info.json` file per user.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<user>/player_info.json`. The id must name a single visible
    /// directory directly under `dir`.
    pub fn record_path(&self, user: &str) -> Result<PathBuf, StoreError> {
        let mut parts = Path::new(user).components();
        let single = matches!((parts.next(), parts.next()), (Some(Component::Normal(_)), None));
        if !single || user.starts_with('.') || user.contains(['/', '\\']) {
            log::warn!("rejected user id {user:?}");
            return Err(StoreError::InvalidUser(user.to_string()));
        }
        Ok(self.dir.join(user).join(RECORD_FILE))
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self, user: &str) -> Result<Option<PlayerRecord>, StoreError> {
        let io_err = |e: io::Error| StoreError::Io { user: user.to_string(), reason: e.to_string() };
        match fs::read_to_string(self.record_path(user)?) {
            Ok(raw) => decode(user, &raw).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(e)),
        }
    }

    fn save(&mut self, user: &str, record: &PlayerRecord) -> Result<(), StoreError> {
        let io_err = |e: io::Error| StoreError::Io { user: user.to_string(), reason: e.to_string() };
        let path = self.record_path(user)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        // write next to the target, then swap in
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, encode(user, record)?).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }

    fn users(&self) -> Result<Vec<String>, StoreError> {
        let io_err = |e: io::Error| StoreError::Io { user: String::new(), reason: e.to_string() };
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_err(e)),
        };
        let mut users = Vec::new();
        for entry in entries {
            let entry = entry.map_err(io_err)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with('.') && entry.path().is_dir() {
                users.push(name);
            }
        }
        users.sort();
        Ok(users)
    }
}

/// Top `limit` records by funds, richest first. Unreadable records are skipped.
pub fn leaderboard(store: &dyn RecordStore, limit: usize) -> Result<Vec<PlayerRecord>, StoreError> {
    let mut records = Vec::new();
    for user in store.users()? {
        match store.load(&user) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => log::warn!("leaderboard skips {user}: {e}"),
        }
    }
    records.sort_by(|a, b| b.funds.cmp(&a.funds).then_with(|| a.name.cmp(&b.name)));
    records.truncate(limit);
    Ok(records)
}
