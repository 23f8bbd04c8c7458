use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::domain::HistoryRecord;
use crate::errors::{WatchError, WatchResult};
use crate::storage::traits::HistoryStore;

/// History kept as a single JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to a sibling temp file, then rename over the target
    fn write_atomic(&self, bytes: &[u8]) -> WatchResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self) -> WatchResult<HistoryRecord> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HistoryRecord::default()),
            Err(e) => return Err(WatchError::Io(e)),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, history: &HistoryRecord) -> WatchResult<()> {
        let mut bytes = serde_json::to_vec_pretty(history)?;
        bytes.push(b'\n');
        self.write_atomic(&bytes)
    }
}
