//! JSON file persistence for the competition and its archives.

use crate::models::{Competition, CompetitionError, History};
use serde::de::DeserializeOwned;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "Storage error: {}", e),
            StoreError::Json(e) => write!(f, "Invalid stored document: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Why [`Store::commit_edit`] gave up.
#[derive(Debug)]
pub enum EditError {
    /// The edit itself was refused; nothing was written.
    Rejected(CompetitionError),
    /// The edited copy could not be written.
    Store(StoreError),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::Rejected(e) => write!(f, "{}", e),
            EditError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EditError {}

impl From<CompetitionError> for EditError {
    fn from(e: CompetitionError) -> Self {
        EditError::Rejected(e)
    }
}

impl From<StoreError> for EditError {
    fn from(e: StoreError) -> Self {
        EditError::Store(e)
    }
}

/// Where the two documents live on disk.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub data: PathBuf,
    pub history: PathBuf,
}

/// Everything the server keeps: the live competition and the archives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub competition: Competition,
    pub history: History,
}

impl Store {
    /// Load both documents; a missing file gives the default value.
    pub async fn load(paths: &StorePaths) -> Result<Self, StoreError> {
        Ok(Self {
            competition: read_json(&paths.data).await?,
            history: read_json(&paths.history).await?,
        })
    }

    /// Serialized competition document.
    pub fn competition_bytes(&self) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec_pretty(&self.competition)?)
    }

    /// Serialized history document.
    pub fn history_bytes(&self) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec_pretty(&self.history)?)
    }

    /// Write both documents.
    pub async fn save(&self, paths: &StorePaths) -> Result<(), StoreError> {
        write_bytes(&paths.data, self.competition_bytes()?).await?;
        write_bytes(&paths.history, self.history_bytes()?).await
    }

    /// Apply `edit` to this store and write both documents.
    ///
    /// Meant to run on a copy of the served store: the copy is only handed
    /// back, with its competition bytes, once both files are written, and the
    /// caller swaps it in. On any error the served store stays as it was.
    pub async fn commit_edit<F>(
        mut self,
        paths: &StorePaths,
        edit: F,
    ) -> Result<(Store, Vec<u8>), EditError>
    where
        F: FnOnce(&mut Store) -> Result<(), CompetitionError>,
    {
        edit(&mut self)?;
        let competition = self.competition_bytes()?;
        let history = self.history_bytes()?;
        write_bytes(&paths.data, competition.clone()).await?;
        write_bytes(&paths.history, history).await?;
        Ok((self, competition))
    }
}

async fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(T::default()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("{} not found, starting empty", path.display());
            Ok(T::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Write `bytes` to `path` through a temporary sibling file, creating parent
/// directories as needed.
async fn write_bytes(path: &Path, bytes: Vec<u8>) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

