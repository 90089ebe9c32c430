//! High score persistence
//!
//! A single decimal integer in a text file. Reading never fails from the
//! caller's point of view: anything missing or malformed counts as zero.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::consts::HIGHSCORE_FILE;

/// Why a high score could not be read or written
#[derive(Debug)]
pub enum HighScoreError {
    Io(std::io::Error),
    /// File exists but does not hold a non-negative integer
    Malformed(String),
}

impl fmt::Display for HighScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "high score file I/O failed: {err}"),
            Self::Malformed(content) => write!(f, "high score file holds {content:?}, not a number"),
        }
    }
}

impl std::error::Error for HighScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(_) => None,
        }
    }
}

/// File-backed high score
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(HIGHSCORE_FILE)
    }
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored record, or 0 when there is none
    pub fn load(&self) -> u64 {
        match self.try_load() {
            Ok(score) => {
                log::info!("Loaded high score {score} from {}", self.path.display());
                score
            }
            Err(HighScoreError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score file, starting fresh");
                0
            }
            Err(err) => {
                log::debug!("{err}; using 0");
                0
            }
        }
    }

    /// Read the stored record, reporting why it could not be used
    pub fn try_load(&self) -> Result<u64, HighScoreError> {
        let raw = std::fs::read_to_string(&self.path).map_err(HighScoreError::Io)?;
        parse_score(&raw)
    }

    /// Overwrite the file with `score`
    pub fn save(&self, score: u64) -> Result<(), HighScoreError> {
        std::fs::write(&self.path, score.to_string()).map_err(HighScoreError::Io)?;
        log::debug!("High score {score} saved to {}", self.path.display());
        Ok(())
    }
}

/// Digits only (surrounding whitespace allowed); no sign, no fraction
fn parse_score(raw: &str) -> Result<u64, HighScoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HighScoreError::Malformed(trimmed.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| HighScoreError::Malformed(trimmed.to_string()))
}
