//! Access to the host editor's image.
//!
//! The preview never owns the full-resolution image. It asks an [`ImageSource`]
//! for the full extent and for crops of the currently visible rectangle.

use std::fmt;
use std::path::Path;

use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PreviewError, Result};
use crate::geometry::{NormalizedRect, PixelSize};

/// Which host layers feed the filter input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputMode {
    NoInput,
    #[default]
    Active,
    All,
    ActiveAndBelow,
    ActiveAndAbove,
    AllVisible,
    AllInvisible,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::NoInput => write!(f, "None"),
            InputMode::Active => write!(f, "Active"),
            InputMode::All => write!(f, "All"),
            InputMode::ActiveAndBelow => write!(f, "Active and below"),
            InputMode::ActiveAndAbove => write!(f, "Active and above"),
            InputMode::AllVisible => write!(f, "All visible"),
            InputMode::AllInvisible => write!(f, "All invisible"),
        }
    }
}

/// Host image provider.
pub trait ImageSource {
    /// Pixel size of the full image for the given input mode.
    fn extent(&self, mode: InputMode) -> PixelSize;

    /// Pixels of the part of the full image covered by `rect`.
    fn cropped_image(&self, rect: &NormalizedRect, mode: InputMode) -> Result<RgbaImage>;

    /// Convert a crop to the display color profile. Hosts without color
    /// management leave the pixels untouched.
    fn apply_color_profile(&self, _image: &mut RgbaImage) {}
}

impl<S: ImageSource + ?Sized> ImageSource for Box<S> {
    fn extent(&self, mode: InputMode) -> PixelSize {
        (**self).extent(mode)
    }

    fn cropped_image(&self, rect: &NormalizedRect, mode: InputMode) -> Result<RgbaImage> {
        (**self).cropped_image(rect, mode)
    }

    fn apply_color_profile(&self, image: &mut RgbaImage) {
        (**self).apply_color_profile(image)
    }
}

/// Image source backed by a single decoded image held in memory.
///
/// Every input mode except [`InputMode::NoInput`] sees the same image.
#[derive(Clone, Debug)]
pub struct MemoryImageSource {
    image: RgbaImage,
}

impl MemoryImageSource {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image: image.into_rgba8(),
        }
    }

    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode an image file from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)?;
        debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "loaded image source"
        );
        Ok(Self::new(image))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl ImageSource for MemoryImageSource {
    fn extent(&self, mode: InputMode) -> PixelSize {
        if mode == InputMode::NoInput {
            return PixelSize::default();
        }
        PixelSize::new(self.image.width(), self.image.height())
    }

    fn cropped_image(&self, rect: &NormalizedRect, mode: InputMode) -> Result<RgbaImage> {
        if mode == InputMode::NoInput {
            return Err(PreviewError::NoInput(mode.to_string()));
        }
        let size = self.extent(mode);
        if size.is_empty() {
            return Err(PreviewError::EmptyCrop {
                width: size.width,
                height: size.height,
            });
        }
        let window = rect.to_pixels(size);
        Ok(
            image::imageops::crop_imm(&self.image, window.x, window.y, window.width, window.height)
                .to_image(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_memory_source_crop_matches_window() {
        let img = RgbaImage::from_fn(10, 10, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let source = MemoryImageSource::from_rgba(img);
        let crop = source
            .cropped_image(&NormalizedRect::new(0.5, 0.2, 0.3, 0.5), InputMode::Active)
            .unwrap();
        assert_eq!(crop.dimensions(), (3, 5));
        assert_eq!(crop.get_pixel(0, 0), &Rgba([5, 2, 0, 255]));
    }

    #[test]
    fn test_no_input_mode_has_no_extent() {
        let source = MemoryImageSource::from_rgba(RgbaImage::new(4, 4));
        assert!(source.extent(InputMode::NoInput).is_empty());
        assert!(source
            .cropped_image(&NormalizedRect::FULL, InputMode::NoInput)
            .is_err());
    }
}
