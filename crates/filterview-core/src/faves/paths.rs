use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::consts::{FAVES_FILENAME, LEGACY_BACKUP_SUFFIX, LEGACY_FAVES_FILENAME};
use crate::error::{PreviewError, Result};

/// Per-user locations of the favorites files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePaths {
    /// Directory holding the current JSON favorites file.
    pub resources_dir: PathBuf,
    /// Directory where pre-release versions wrote their favorites.
    pub legacy_dir: PathBuf,
}

impl ResourcePaths {
    pub fn new(resources_dir: impl Into<PathBuf>, legacy_dir: impl Into<PathBuf>) -> Self {
        Self {
            resources_dir: resources_dir.into(),
            legacy_dir: legacy_dir.into(),
        }
    }

    /// `<config dir>/gmic` for resources, `<config dir>` for legacy files.
    pub fn from_user_dirs() -> Result<Self> {
        let dirs = BaseDirs::new().ok_or(PreviewError::NoUserDirs)?;
        let config = dirs.config_dir();
        Ok(Self::new(config.join("gmic"), config))
    }

    /// Use the configured override when present, the user directories otherwise.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self> {
        match override_dir {
            Some(dir) => Ok(Self::new(dir, dir)),
            None => Self::from_user_dirs(),
        }
    }

    pub fn faves_file(&self) -> PathBuf {
        self.resources_dir.join(FAVES_FILENAME)
    }

    /// Legacy favorites file and its backup.
    pub fn legacy_faves_files(&self) -> [PathBuf; 2] {
        let legacy = self.legacy_dir.join(LEGACY_FAVES_FILENAME);
        let backup = self
            .legacy_dir
            .join(format!("{LEGACY_FAVES_FILENAME}{LEGACY_BACKUP_SUFFIX}"));
        [legacy, backup]
    }
}
