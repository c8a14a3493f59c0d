//! Player settings and tuning overrides, kept as TOML in the app data directory.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use arcade_core::{ClimbTuning, MazeTuning};

use crate::APP_NAME;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SettingsFile {
    pub sound_enabled: bool,
    pub haptics_enabled: bool,
    pub maze: MazeTuning,
    pub climb: ClimbTuning,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            haptics_enabled: true,
            maze: MazeTuning::default(),
            climb: ClimbTuning::default(),
        }
    }
}

impl SettingsFile {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.config_dir().to_path_buf();
            path.push("settings.toml");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        let text = toml::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, text)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self =
            toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(settings)
    }

    pub fn load_or_default(path: &Path) -> io::Result<Self> {
        match Self::load(path) {
            Ok(settings) => Ok(settings),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }
}
