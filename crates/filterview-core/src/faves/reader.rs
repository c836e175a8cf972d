use std::fs;
use std::io::ErrorKind;

use tracing::debug;

use super::model::{Fave, FavesModel};
use super::paths::ResourcePaths;
use crate::error::Result;

/// Load the favorites file. A missing file is an empty model.
pub fn read_faves(paths: &ResourcePaths) -> Result<FavesModel> {
    let path = paths.faves_file();
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no favorites file");
            return Ok(FavesModel::new());
        }
        Err(e) => return Err(e.into()),
    };
    let faves: Vec<Fave> = serde_json::from_str(&text)?;
    debug!(path = %path.display(), count = faves.len(), "favorites loaded");
    Ok(faves.into_iter().collect())
}
