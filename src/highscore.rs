use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Somewhere to keep the best score achieved so far
pub(crate) trait ScoreStore {
    /// Return the stored high score, if any
    fn get(&self) -> Option<u32>;

    /// Replace the stored high score
    fn set(&mut self, score: u32) -> Result<(), SaveError>;
}

/// A high score kept in a JSON file on disk.
///
/// The file is read once, by [`HighScoreFile::load()`]; afterwards every call
/// to [`ScoreStore::set()`] overwrites it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScoreFile {
    path: PathBuf,
    score: Option<u32>,
}

impl HighScoreFile {
    /// Return the default high score file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("high-score.json"))
    }

    /// Read the high score from the file at `path`.  A missing file is treated
    /// as there being no high score yet.
    pub(crate) fn load(path: PathBuf) -> Result<HighScoreFile, LoadError> {
        let score = match fs_err::read(&path) {
            Ok(src) => {
                let record =
                    serde_json::from_slice::<HighScoreRecord>(&src).map_err(LoadError::deserialize)?;
                Some(record.high_score)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(LoadError::read(e)),
        };
        Ok(HighScoreFile { path, score })
    }

    /// Create a store for the file at `path` without reading it.  Used when
    /// the file could not be loaded, so that new high scores can still be
    /// saved.
    pub(crate) fn empty(path: PathBuf) -> HighScoreFile {
        HighScoreFile { path, score: None }
    }
}

impl ScoreStore for HighScoreFile {
    fn get(&self) -> Option<u32> {
        self.score
    }

    fn set(&mut self, score: u32) -> Result<(), SaveError> {
        self.score = Some(score);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(&HighScoreRecord { high_score: score })
            .map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

/// A high score that only lasts as long as the process
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(Option<u32>);

impl MemoryStore {
    #[cfg(test)]
    pub(crate) fn with_score(score: u32) -> MemoryStore {
        MemoryStore(Some(score))
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self) -> Option<u32> {
        self.0
    }

    fn set(&mut self, score: u32) -> Result<(), SaveError> {
        self.0 = Some(score);
        Ok(())
    }
}

/// Either kind of store, as selected by the configuration
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum AnyStore {
    File(HighScoreFile),
    Memory(MemoryStore),
}

impl ScoreStore for AnyStore {
    fn get(&self) -> Option<u32> {
        match self {
            AnyStore::File(f) => f.get(),
            AnyStore::Memory(m) => m.get(),
        }
    }

    fn set(&mut self, score: u32) -> Result<(), SaveError> {
        match self {
            AnyStore::File(f) => f.set(score),
            AnyStore::Memory(m) => m.set(score),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct HighScoreRecord {
    high_score: u32,
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score")]
    Deserialize(#[source] serde_json::Error),
}
