//! Normalized and pixel-space geometry shared by the preview controller and its hosts.

use serde::{Deserialize, Serialize};

use crate::consts::VIEWPORT_EPSILON;

/// A point expressed in fractions of the full image size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates lie inside the image.
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// Visible part of the full image, in fractions of its width and height.
///
/// Kept inside the image: `x + w <= 1`, `y + h <= 1`, `x, y >= 0`.
/// [`NormalizedRect::FULL`] means the whole image is visible.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl NormalizedRect {
    pub const FULL: NormalizedRect = NormalizedRect {
        x: 0.0,
        y: 0.0,
        w: 1.0,
        h: 1.0,
    };

    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }

    pub fn center(&self) -> NormalizedPoint {
        NormalizedPoint::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn top_left(&self) -> NormalizedPoint {
        NormalizedPoint::new(self.x, self.y)
    }

    /// Move the rect so that its center is as close to `p` as the image bounds allow.
    pub fn move_center(&mut self, p: NormalizedPoint) {
        let half_w = self.w / 2.0;
        let half_h = self.h / 2.0;
        self.x = (p.x - half_w).max(0.0).min(1.0 - self.w);
        self.y = (p.y - half_h).max(0.0).min(1.0 - self.h);
    }

    /// Center the rect on the image.
    pub fn move_to_center(&mut self) {
        self.x = ((1.0 - self.w) / 2.0).max(0.0);
        self.y = ((1.0 - self.h) / 2.0).max(0.0);
    }

    /// Shift the origin, keeping the rect inside the image.
    pub fn translate_clamped(&mut self, dx: f64, dy: f64) {
        self.x = (self.x + dx).min(1.0 - self.w).max(0.0);
        self.y = (self.y + dy).min(1.0 - self.h).max(0.0);
    }

    /// Pull the origin back so the rect does not extend past the right/bottom edges.
    pub fn clamp_origin(&mut self) {
        self.x = self.x.min(1.0 - self.w);
        self.y = self.y.min(1.0 - self.h);
    }

    /// Whether the rect satisfies the containment invariant (with a small float slack).
    pub fn is_inside_image(&self) -> bool {
        self.x >= -VIEWPORT_EPSILON
            && self.y >= -VIEWPORT_EPSILON
            && self.x + self.w <= 1.0 + VIEWPORT_EPSILON
            && self.y + self.h <= 1.0 + VIEWPORT_EPSILON
    }

    /// Integer pixel window covered by this rect on an image of the given size.
    ///
    /// The window is at least one pixel wide and high and never exceeds the image.
    pub fn to_pixels(&self, size: PixelSize) -> PixelWindow {
        let width = size.width as f64;
        let height = size.height as f64;
        let x = ((self.x * width).floor().max(0.0) as u32).min(size.width.saturating_sub(1));
        let y = ((self.y * height).floor().max(0.0) as u32).min(size.height.saturating_sub(1));
        let w = ((self.w * width).round() as u32).clamp(1, (size.width - x).max(1));
        let h = ((self.h * height).round() as u32).clamp(1, (size.height - y).max(1));
        PixelWindow {
            x,
            y,
            width: w,
            height: h,
        }
    }
}

impl Default for NormalizedRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Widget or image size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Largest size with this aspect ratio that fits inside `bounds`.
    pub fn scaled_to_fit(&self, bounds: PixelSize) -> PixelSize {
        if self.is_empty() {
            return *self;
        }
        let rw = bounds.width as f64 / self.width as f64;
        let rh = bounds.height as f64 / self.height as f64;
        let ratio = rw.min(rh);
        PixelSize::new(
            (self.width as f64 * ratio).round() as u32,
            (self.height as f64 * ratio).round() as u32,
        )
    }

    /// Size multiplied by `factor`, rounded to whole pixels.
    pub fn scaled_by(&self, factor: f64) -> PixelSize {
        PixelSize::new(
            (self.width as f64 * factor).round() as u32,
            (self.height as f64 * factor).round() as u32,
        )
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Position inside the widget, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_length(&self) -> i32 {
        self.x.abs() + self.y.abs()
    }
}

impl std::ops::Sub for PixelPoint {
    type Output = PixelPoint;

    fn sub(self, rhs: PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Rectangle inside the widget, in pixels. The origin may be negative when the
/// displayed image is larger than the widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top_left(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(
            self.x + (self.width as i32 - 1) / 2,
            self.y + (self.height as i32 - 1) / 2,
        )
    }

    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && p.x < self.x + self.width as i32
            && p.y < self.y + self.height as i32
    }
}

/// Integer crop window inside a full image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
