use image::RgbaImage;
use tracing::{trace, warn};

use super::{PreviewController, PreviewState};
use crate::geometry::{NormalizedRect, PixelRect, PixelSize};
use crate::source::ImageSource;

/// Crop of the full image for one visible rect.
#[derive(Debug, Default)]
pub struct CropCache {
    image: Option<RgbaImage>,
    rect: Option<NormalizedRect>,
}

impl CropCache {
    /// The cached pixels were computed for exactly this rect.
    pub fn is_valid_for(&self, rect: &NormalizedRect) -> bool {
        self.rect.as_ref() == Some(rect)
    }

    pub fn invalidate(&mut self) {
        self.rect = None;
    }

    pub fn store(&mut self, rect: NormalizedRect, image: RgbaImage) {
        self.image = Some(image);
        self.rect = Some(rect);
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn size(&self) -> PixelSize {
        self.image
            .as_ref()
            .map(|img| PixelSize::new(img.width(), img.height()))
            .unwrap_or_default()
    }
}

/// What the host should paint for the current frame.
#[derive(Debug)]
pub struct DisplayFrame<'a> {
    pub state: PreviewState,
    /// Pixels to draw, stretched to `target`. `None` when nothing is available yet.
    pub image: Option<&'a RgbaImage>,
    /// Destination rectangle in widget pixels.
    pub target: PixelRect,
    /// Render error drawn over `target`.
    pub overlay: Option<&'a str>,
}

impl<S: ImageSource> PreviewController<S> {
    /// Size of the original crop for the visible rect.
    pub fn original_image_crop_size(&mut self) -> PixelSize {
        self.ensure_original_crop();
        self.crop.size()
    }

    /// Original crop for the visible rect, fetched from the image source on a cache miss.
    pub fn original_image_crop(&mut self) -> Option<&RgbaImage> {
        self.ensure_original_crop();
        self.crop.image()
    }

    fn ensure_original_crop(&mut self) {
        if !self.crop.is_valid_for(&self.visible_rect) {
            self.update_cached_original_image_crop();
        }
    }

    /// Refetch the crop. On failure the previous crop is kept and the cache
    /// stays keyed to its old rect, so the next access retries.
    fn update_cached_original_image_crop(&mut self) {
        if self.full_image_size.is_empty() {
            return;
        }
        match self
            .source
            .cropped_image(&self.visible_rect, self.input_mode)
        {
            Ok(mut image) => {
                self.source.apply_color_profile(&mut image);
                trace!(
                    rect = ?self.visible_rect,
                    width = image.width(),
                    height = image.height(),
                    "original crop refreshed"
                );
                self.crop.store(self.visible_rect, image);
            }
            Err(e) => {
                warn!(rect = ?self.visible_rect, "cannot fetch original crop: {e}");
            }
        }
    }

    /// Place the original crop, scaled by the zoom, inside the widget.
    ///
    /// An image smaller than the widget is centered. Above zoom 1 a larger
    /// image is shifted by the sub-pixel part of the rect origin so that
    /// neighbouring views line up with whole source pixels.
    pub(super) fn update_original_image_position(&mut self) {
        self.original_size = self.original_image_crop_size();
        let widget = self.widget_size;
        let zoom = self.zoom;
        if zoom > 1.0 {
            self.expected_preview_size = Some(self.original_size);
            let image_size = self.original_size.scaled_by(zoom);
            let top = if image_size.height > widget.height {
                let origin = self.visible_rect.y * self.full_image_size.height as f64;
                -(((origin - origin.floor()) * zoom) as i32)
            } else {
                (widget.height as i32 - image_size.height as i32) / 2
            };
            let left = if image_size.width > widget.width {
                let origin = self.visible_rect.x * self.full_image_size.width as f64;
                -(((origin - origin.floor()) * zoom) as i32)
            } else {
                (widget.width as i32 - image_size.width as i32) / 2
            };
            self.image_position = PixelRect::new(left, top, image_size.width, image_size.height);
        } else {
            let scaled = self.original_size.scaled_by(zoom);
            self.expected_preview_size = Some(scaled);
            self.image_position = centered(widget, scaled);
        }
    }

    /// Lay out and return what should be painted now.
    pub fn display_frame(&mut self) -> DisplayFrame<'_> {
        match self.state {
            PreviewState::ShowingOriginal => {
                self.ensure_original_crop();
                self.update_original_image_position();
                DisplayFrame {
                    state: self.state,
                    image: self.crop.image(),
                    target: self.image_position,
                    overlay: None,
                }
            }
            PreviewState::ShowingPreview => {
                if self.saved_preview.is_none() {
                    // error before any preview arrived: overlay the original
                    self.ensure_original_crop();
                    self.update_original_image_position();
                }
                self.place_preview();
                let image = match self.saved_preview.as_ref() {
                    Some(preview) => Some(preview),
                    None => self.crop.image(),
                };
                DisplayFrame {
                    state: self.state,
                    image,
                    target: self.image_position,
                    overlay: self.error_message.as_deref(),
                }
            }
        }
    }

    /// A preview whose size differs from the scaled original crop (or a small
    /// image shown whole and magnified) is fitted to the widget instead of
    /// reusing the original crop's placement.
    fn place_preview(&mut self) {
        let Some(preview) = self.saved_preview.as_ref() else {
            return;
        };
        let preview_size = PixelSize::new(preview.width(), preview.height());
        let mismatched = Some(preview_size) != self.expected_preview_size;
        if !mismatched && !(self.is_at_full_zoom() && self.zoom > 1.0) {
            return;
        }
        let image_size = if mismatched {
            preview_size.scaled_to_fit(self.widget_size)
        } else {
            self.original_size.scaled_by(self.zoom)
        };
        self.image_position = centered(self.widget_size, image_size);
        self.expected_preview_size = None;
    }
}

fn centered(widget: PixelSize, size: PixelSize) -> PixelRect {
    PixelRect::new(
        ((widget.width as i32 - size.width as i32) / 2).max(0),
        ((widget.height as i32 - size.height as i32) / 2).max(0),
        size.width,
        size.height,
    )
}
