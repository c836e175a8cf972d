use std::path::PathBuf;

use filterview_core::faves::{FavesModel, ResourcePaths};

use super::choices::{FilterChoice, PreviewFactorChoice};

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,

    /// Filter the renderer applies to the visible crop.
    pub filter: FilterChoice,
    pub preview_factor: PreviewFactorChoice,

    /// Request being rendered by the worker, if any.
    pub rendering: Option<u64>,
    pub last_render_ms: Option<u128>,

    /// Favorites and where they are stored. `None` when no user directory could be resolved.
    pub faves: FavesModel,
    pub faves_paths: Option<ResourcePaths>,
    pub new_fave_name: String,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.rendering.is_some()
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
