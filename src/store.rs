//! Local persistence: a small file-backed key-value store and the report
//! slot, history log and theme preference kept in it.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::app_dirs;
use crate::report::{CURRENT_SCHEMA_VERSION, HistoryEntry, PredictionReport, StoredReport};

/// Key holding the theme preference.
pub const THEME_KEY: &str = "hp_theme";
/// Key holding the current report.
pub const REPORT_KEY: &str = "lastReport";
/// Key holding the history array.
pub const HISTORY_KEY: &str = "history";

/// Errors raised by local persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not resolve storage directory: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Stored history is unreadable: {0}")]
    CorruptHistory(String),
}

/// String key-value store with one file per key.
#[derive(Clone, Debug)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Write {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    /// Replace the value for `key`; readers never observe a half-written file.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let write_err = |source| StoreError::Write {
            path: path.clone(),
            source,
        };
        let mut temp = tempfile::NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        temp.write_all(value.as_bytes()).map_err(write_err)?;
        temp.flush().map_err(write_err)?;
        temp.persist(&path)
            .map_err(|err| StoreError::Write {
                path: path.clone(),
                source: err.error,
            })?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Light or dark UI theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// What the current-report slot holds.
#[derive(Clone, Debug, PartialEq)]
pub enum ReportSlot {
    Empty,
    Present(PredictionReport),
    /// Something is stored but cannot be used; views treat this as no report.
    Unreadable(String),
}

impl ReportSlot {
    pub fn report(&self) -> Option<&PredictionReport> {
        match self {
            Self::Present(report) => Some(report),
            _ => None,
        }
    }

    pub fn into_report(self) -> Option<PredictionReport> {
        match self {
            Self::Present(report) => Some(report),
            _ => None,
        }
    }
}

/// Report slot, history log and theme preference on top of [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct ReportStore {
    kv: KeyValueStore,
}

impl ReportStore {
    pub fn new(kv: KeyValueStore) -> Self {
        Self { kv }
    }

    /// Open the store in the application's storage directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::new(KeyValueStore::open(app_dirs::storage_dir()?)?))
    }

    pub fn open_in(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self::new(KeyValueStore::open(dir)?))
    }

    pub fn kv(&self) -> &KeyValueStore {
        &self.kv
    }

    /// Overwrite the current report.
    pub fn save(&self, report: &PredictionReport) -> Result<(), StoreError> {
        let stored = StoredReport {
            schema_version: CURRENT_SCHEMA_VERSION,
            report: report.clone(),
        };
        let text = serde_json::to_string(&stored)?;
        self.kv.set(REPORT_KEY, &text)
    }

    /// The current report, or `None` when absent or unreadable.
    pub fn load(&self) -> Option<PredictionReport> {
        self.load_slot().into_report()
    }

    /// Classify the current-report slot without discarding why it is unusable.
    pub fn load_slot(&self) -> ReportSlot {
        let text = match self.kv.get(REPORT_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return ReportSlot::Empty,
            Err(err) => {
                tracing::warn!("Stored report could not be read: {err}");
                return ReportSlot::Unreadable(err.to_string());
            }
        };
        let slot = parse_report_slot(&text);
        if let ReportSlot::Unreadable(reason) = &slot {
            tracing::warn!("Ignoring stored report: {reason}");
        }
        slot
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.kv.remove(REPORT_KEY)
    }

    /// Prepend a copy of `report` to the history, keeping at most `limit`
    /// entries. Returns the resulting history length.
    pub fn append_history(
        &self,
        report: &PredictionReport,
        saved_at: OffsetDateTime,
        limit: usize,
    ) -> Result<usize, StoreError> {
        let mut history = self.history()?;
        history.insert(0, HistoryEntry::new(report.clone(), saved_at));
        history.truncate(limit.max(1));
        let text = serde_json::to_string(&history)?;
        self.kv.set(HISTORY_KEY, &text)?;
        Ok(history.len())
    }

    /// The stored history, most recent first.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let Some(text) = self.kv.get(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|err| StoreError::CorruptHistory(err.to_string()))
    }

    /// Stored theme, defaulting to light for missing or unknown values.
    pub fn theme(&self) -> ThemePreference {
        match self.kv.get(THEME_KEY) {
            Ok(Some(value)) => ThemePreference::parse(&value).unwrap_or_default(),
            Ok(None) => ThemePreference::default(),
            Err(err) => {
                tracing::warn!("Theme preference unreadable: {err}");
                ThemePreference::default()
            }
        }
    }

    pub fn set_theme(&self, theme: ThemePreference) -> Result<(), StoreError> {
        self.kv.set(THEME_KEY, theme.as_str())
    }
}

fn parse_report_slot(text: &str) -> ReportSlot {
    let stored: StoredReport = match serde_json::from_str(text) {
        Ok(stored) => stored,
        Err(err) => return ReportSlot::Unreadable(format!("invalid report JSON: {err}")),
    };
    if stored.schema_version > CURRENT_SCHEMA_VERSION {
        return ReportSlot::Unreadable(format!(
            "report layout version {} is newer than supported version {}",
            stored.schema_version, CURRENT_SCHEMA_VERSION
        ));
    }
    ReportSlot::Present(stored.report)
}
