use std::fs;
use std::io::Write;

use tempfile::NamedTempFile;
use tracing::{debug, error};

use super::model::{Fave, FavesModel};
use super::paths::ResourcePaths;
use crate::error::{PreviewError, Result};

/// Saves a [`FavesModel`] as a JSON array.
pub struct FavesWriter<'a> {
    model: &'a FavesModel,
}

impl<'a> FavesWriter<'a> {
    pub fn new(model: &'a FavesModel) -> Self {
        Self { model }
    }

    /// Serialized file content.
    pub fn to_json(&self) -> Result<String> {
        let faves: Vec<&Fave> = self.model.iter().collect();
        Ok(serde_json::to_string_pretty(&faves)?)
    }

    /// Write the favorites file, then remove the legacy files.
    ///
    /// The content goes to a temporary file next to the target which then
    /// replaces it, so a failed write leaves the previous file intact. Failures
    /// are logged and returned; legacy cleanup is best effort.
    pub fn write_faves(&self, paths: &ResourcePaths) -> Result<()> {
        let target = paths.faves_file();
        let json = self.to_json()?;
        if let Err(source) = self.replace_file(paths, json.as_bytes()) {
            error!("cannot open/create file {}: {source}", target.display());
            return Err(PreviewError::FavesWrite {
                path: target,
                source,
            });
        }
        debug!(path = %target.display(), count = self.model.len(), "favorites written");

        for legacy in paths.legacy_faves_files() {
            match fs::remove_file(&legacy) {
                Ok(()) => debug!(path = %legacy.display(), "removed legacy favorites file"),
                Err(e) => debug!(path = %legacy.display(), "legacy favorites file not removed: {e}"),
            }
        }
        Ok(())
    }

    fn replace_file(&self, paths: &ResourcePaths, content: &[u8]) -> std::io::Result<()> {
        fs::create_dir_all(&paths.resources_dir)?;
        let mut tmp = NamedTempFile::new_in(&paths.resources_dir)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(paths.faves_file()).map_err(|e| e.error)?;
        Ok(())
    }
}
