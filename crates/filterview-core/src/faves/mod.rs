//! Favorite filters: in-memory model and its JSON persistence.

mod model;
mod paths;
mod reader;
mod writer;

pub use model::{Fave, FavesModel};
pub use paths::ResourcePaths;
pub use reader::read_faves;
pub use writer::FavesWriter;
