mod choices;
mod ui;
mod viewport;

pub use choices::{FilterChoice, PreviewFactorChoice};
pub use ui::UIState;
pub use viewport::{TextureKey, ViewportState};
