use filterview_core::geometry::{NormalizedRect, PixelSize};
use filterview_core::preview::PreviewState;

/// What the uploaded texture was built from. A new upload happens when it changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureKey {
    pub state: PreviewState,
    pub request: u64,
    pub rect: NormalizedRect,
    pub size: PixelSize,
}

/// Viewport display state.
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    pub texture_key: Option<TextureKey>,
    /// Widget size reported to the controller at the last frame.
    pub widget_size: PixelSize,
    /// Wheel rotation not yet turned into whole notches, in points.
    pub scroll_accum: f32,
    pub focused: bool,
    pub minimized: bool,
    pub zoom_label: String,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            texture: None,
            texture_key: None,
            widget_size: PixelSize::default(),
            scroll_accum: 0.0,
            focused: true,
            minimized: false,
            zoom_label: String::from("100%"),
        }
    }
}
