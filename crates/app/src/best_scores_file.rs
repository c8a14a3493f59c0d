//! Best score per game, persisted as JSON in the app data directory.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use arcade_core::GameId;

use crate::APP_NAME;

pub const BEST_SCORES_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BestScoresFile {
    pub format_version: u32,
    /// Keyed by `GameId::as_str`; unknown keys are kept so newer files survive a round trip.
    pub scores: BTreeMap<String, u64>,
}

impl Default for BestScoresFile {
    fn default() -> Self {
        Self { format_version: BEST_SCORES_FORMAT_VERSION, scores: BTreeMap::new() }
    }
}

impl BestScoresFile {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("best_scores.json");
            path
        })
    }

    pub fn best(&self, game: GameId) -> u64 {
        self.scores.get(game.as_str()).copied().unwrap_or(0)
    }

    /// Keeps `score` if it beats the stored best. Returns whether it did.
    pub fn record(&mut self, game: GameId, score: u64) -> bool {
        let best = self.scores.entry(game.as_str().to_string()).or_insert(0);
        if score <= *best {
            return false;
        }
        *best = score;
        true
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let state: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(state)
    }

    /// A missing file means no run has finished yet.
    pub fn load_or_default(path: &Path) -> io::Result<Self> {
        match Self::load(path) {
            Ok(state) => Ok(state),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }
}
