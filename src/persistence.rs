use crate::error::{HistoryError, HistoryResult};
use crate::record::LocationRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Storage behind the history store.
///
/// Implementations must be all-or-nothing: `write_all` either stores the whole
/// sequence or leaves the previous one in place.
#[async_trait]
pub trait HistoryBackend: Send + Sync {
    /// Reads the full stored history, in stored order.
    async fn read_all(&self) -> HistoryResult<Vec<LocationRecord>>;

    /// Replaces the stored history with `records`.
    async fn write_all(&self, records: &[LocationRecord]) -> HistoryResult<()>;
}

/// History kept as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.lazyweather/history.json`, or a local file when there is no home.
    pub fn default_path() -> PathBuf {
        match dirs::home_dir() {
            Some(home) => home.join(".lazyweather").join("history.json"),
            None => PathBuf::from(".lazyweather-history.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl HistoryBackend for JsonFileBackend {
    async fn read_all(&self) -> HistoryResult<Vec<LocationRecord>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No history file at {:?}", self.path);
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(HistoryError::PersistenceRead(format!("{:?}: {}", self.path, e)));
            }
        };

        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&json)
            .map_err(|e| HistoryError::PersistenceRead(format!("{:?}: {}", self.path, e)))
    }

    async fn write_all(&self, records: &[LocationRecord]) -> HistoryResult<()> {
        let write_err = |e: &dyn std::fmt::Display| HistoryError::PersistenceWrite(format!("{:?}: {}", self.path, e));

        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(dir).await.map_err(|e| write_err(&e))?;
        }

        let json = serde_json::to_string_pretty(records).map_err(|e| write_err(&e))?;

        // Write next to the target and rename so readers never see half a file.
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await.map_err(|e| write_err(&e))?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(write_err(&e));
        }

        info!("Wrote {} history record(s) to {:?}", records.len(), self.path);
        Ok(())
    }
}

/// History that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: Mutex<Vec<LocationRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<LocationRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl HistoryBackend for MemoryBackend {
    async fn read_all(&self) -> HistoryResult<Vec<LocationRecord>> {
        self.records
            .lock()
            .map(|records| records.clone())
            .map_err(|e| HistoryError::PersistenceRead(e.to_string()))
    }

    async fn write_all(&self, records: &[LocationRecord]) -> HistoryResult<()> {
        let mut stored = self
            .records
            .lock()
            .map_err(|e| HistoryError::PersistenceWrite(e.to_string()))?;
        *stored = records.to_vec();
        Ok(())
    }
}
