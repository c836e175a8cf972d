use tracing::trace;

use super::{PreviewController, PreviewSignal};
use crate::config::PreviewFactor;
use crate::consts::{DEFAULT_ZOOM_TOLERANCE, VIEWPORT_EPSILON};
use crate::geometry::{NormalizedPoint, NormalizedRect, PixelPoint};
use crate::source::ImageSource;

impl<S: ImageSource> PreviewController<S> {
    /// Zoom at which the whole image fits the widget, or `None` while either
    /// the widget or the full image has no area.
    pub fn fit_zoom(&self) -> Option<f64> {
        if self.widget_size.is_empty() || self.full_image_size.is_empty() {
            return None;
        }
        let zx = self.widget_size.width as f64 / self.full_image_size.width as f64;
        let zy = self.widget_size.height as f64 / self.full_image_size.height as f64;
        Some(zx.min(zy))
    }

    pub(super) fn geometry_ready(&self) -> bool {
        !self.widget_size.is_empty() && !self.full_image_size.is_empty()
    }

    /// Recompute the rect size from the zoom and widget size, keeping it inside the image.
    pub fn update_visible_rect(&mut self) {
        if !self.geometry_ready() || self.zoom <= 0.0 {
            return;
        }
        let full_w = self.full_image_size.width as f64;
        let full_h = self.full_image_size.height as f64;
        self.visible_rect.w = span(self.widget_size.width as f64 / (self.zoom * full_w));
        self.visible_rect.h = span(self.widget_size.height as f64 / (self.zoom * full_h));
        self.visible_rect.clamp_origin();
    }

    /// Normalized image coordinate under `p` (pixels from the displayed image's top-left).
    fn anchor_position(&self, p: PixelPoint) -> NormalizedPoint {
        NormalizedPoint::new(
            p.x as f64 / (self.zoom * self.full_image_size.width as f64) + self.visible_rect.x,
            p.y as f64 / (self.zoom * self.full_image_size.height as f64) + self.visible_rect.y,
        )
    }

    /// Pan so that `anchor` is under `p` again after a zoom change.
    fn restore_anchor(&mut self, p: PixelPoint, anchor: NormalizedPoint) {
        let moved = self.anchor_position(p);
        self.translate_normalized(anchor.x - moved.x, anchor.y - moved.y);
    }

    fn finish_zoom(&mut self) {
        self.save_visible_center();
        self.on_preview_parameters_changed();
        self.emit_zoom_changed();
    }

    /// Center of the displayed part of the image, relative to its top-left.
    fn image_center_anchor(&self) -> PixelPoint {
        let shown_w = self.visible_rect.w * self.full_image_size.width as f64 * self.zoom;
        let shown_h = self.visible_rect.h * self.full_image_size.height as f64 * self.zoom;
        PixelPoint::new((shown_w / 2.0) as i32, (shown_h / 2.0) as i32)
    }

    /// Zoom in by `steps` around `p`, relative to the displayed image's top-left.
    pub fn zoom_in(&mut self, p: PixelPoint, steps: u32) {
        if !self.geometry_ready() || self.zoom >= self.max_zoom {
            return;
        }
        let previous = self.zoom;
        let anchor = self.anchor_position(p);
        for _ in 0..steps {
            self.zoom *= self.zoom_step;
        }
        if self.zoom >= self.max_zoom {
            self.zoom = self.max_zoom;
        }
        if self.zoom == previous {
            return;
        }
        self.update_visible_rect();
        self.restore_anchor(p, anchor);
        trace!(from = previous, to = self.zoom, "zoom in");
        self.finish_zoom();
    }

    /// Zoom out by `steps` around `p`. Stops at the full-image fit.
    pub fn zoom_out(&mut self, p: PixelPoint, steps: u32) {
        if !self.geometry_ready() || self.is_at_full_zoom() {
            return;
        }
        let previous = self.zoom;
        let anchor = self.anchor_position(p);
        for _ in 0..steps {
            self.zoom /= self.zoom_step;
        }
        self.update_visible_rect();
        if self.is_at_full_zoom() {
            if let Some(fit) = self.fit_zoom() {
                self.zoom = fit;
            }
        }
        if self.zoom == previous {
            return;
        }
        self.restore_anchor(p, anchor);
        trace!(from = previous, to = self.zoom, "zoom out");
        self.finish_zoom();
    }

    /// One zoom step in, around the center of the displayed image.
    pub fn zoom_in_center(&mut self) {
        let p = self.image_center_anchor();
        self.zoom_in(p, 1);
    }

    /// One zoom step out, around the center of the displayed image.
    pub fn zoom_out_center(&mut self) {
        let p = self.image_center_anchor();
        self.zoom_out(p, 1);
    }

    /// Fit the whole image in the widget.
    pub fn zoom_full_image(&mut self) {
        let Some(fit) = self.fit_zoom() else {
            return;
        };
        self.visible_rect = NormalizedRect::FULL;
        self.zoom = fit;
        self.on_preview_parameters_changed();
        self.emit_zoom_changed();
    }

    /// Jump to an absolute zoom, around the center of the displayed image.
    ///
    /// Zooms above the maximum, and zooming out while the whole image is
    /// already shown, are refused; the current zoom is still announced so a
    /// zoom entry field can revert.
    pub fn set_zoom_level(&mut self, zoom: f64) {
        if zoom == self.zoom {
            return;
        }
        if !zoom.is_finite()
            || zoom <= 0.0
            || zoom > self.max_zoom
            || (self.is_at_full_zoom() && zoom < self.zoom)
        {
            self.emit_zoom_changed();
            return;
        }
        if !self.geometry_ready() {
            return;
        }
        let previous = self.zoom;
        let p = self.image_center_anchor();
        let anchor = self.anchor_position(p);
        self.zoom = zoom;
        self.update_visible_rect();
        if self.is_at_full_zoom() {
            if let Some(fit) = self.fit_zoom() {
                self.zoom = fit;
            }
        }
        if self.zoom == previous {
            return;
        }
        self.restore_anchor(p, anchor);
        self.finish_zoom();
    }

    /// Pan by a shift expressed in full-image pixels. Returns true if the rect moved.
    pub fn translate_full_image(&mut self, dx: f64, dy: f64) -> bool {
        if self.full_image_size.is_empty() {
            return false;
        }
        let moved = self.translate_normalized(
            dx / self.full_image_size.width as f64,
            dy / self.full_image_size.height as f64,
        );
        if moved {
            self.save_visible_center();
        }
        moved
    }

    /// Pan by a normalized shift, clamped to the image. Returns true if the rect moved.
    pub fn translate_normalized(&mut self, dx: f64, dy: f64) -> bool {
        let previous = self.visible_rect.top_left();
        self.visible_rect.translate_clamped(dx, dy);
        self.visible_rect.top_left() != previous
    }

    /// Drag shift in widget pixels, converted to a pan of the full image.
    pub(super) fn on_mouse_translation_in_image(&mut self, shift: PixelPoint) {
        if shift.manhattan_length() == 0 {
            return;
        }
        self.emit(PreviewSignal::VisibleRectChanging);
        let moved =
            self.translate_full_image(shift.x as f64 / self.zoom, shift.y as f64 / self.zoom);
        if moved {
            self.invalidate_saved_preview();
            self.supersede_requests();
        }
        self.display_original_image();
    }

    /// Zoom a filter would start at for the current preview factor.
    pub fn default_zoom_factor(&self) -> f64 {
        let fit = self.fit_zoom().unwrap_or(1.0);
        match self.preview_factor {
            PreviewFactor::FullImage => fit,
            PreviewFactor::Factor(f) if f > 1.0 => f * fit,
            _ => 1.0,
        }
    }

    pub fn is_at_default_zoom(&self) -> bool {
        match self.preview_factor {
            PreviewFactor::Any => true,
            PreviewFactor::ActualSize if self.zoom >= 1.0 => true,
            _ => (self.zoom - self.default_zoom_factor()).abs() < DEFAULT_ZOOM_TOLERANCE,
        }
    }

    /// Apply a filter's preview factor.
    ///
    /// `reset` centers the rect on the image; otherwise the last saved center
    /// is restored.
    pub fn set_preview_factor(&mut self, factor: PreviewFactor, reset: bool) {
        self.preview_factor = factor;
        if !self.geometry_ready() {
            self.emit_zoom_changed();
            return;
        }
        let refit = factor == PreviewFactor::FullImage || (factor == PreviewFactor::Any && reset);
        if refit {
            if let Some(fit) = self.fit_zoom() {
                self.zoom = fit;
            }
            self.visible_rect = NormalizedRect::FULL;
        } else if factor == PreviewFactor::Any {
            self.update_visible_rect();
            self.visible_rect.move_center(self.saved_center);
        } else {
            self.zoom = self.default_zoom_factor();
            self.update_visible_rect();
            if reset {
                self.visible_rect.move_to_center();
            } else {
                self.visible_rect.move_center(self.saved_center);
            }
        }
        self.emit_zoom_changed();
    }
}

/// Fraction of the image covered along one axis. Spans that reach the edge
/// up to rounding error count as the whole axis.
fn span(fraction: f64) -> f64 {
    if fraction >= 1.0 - VIEWPORT_EPSILON {
        1.0
    } else {
        fraction
    }
}
