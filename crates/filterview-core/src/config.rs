use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{PREVIEW_MAX_ZOOM_FACTOR, RESIZE_DELAY, ZOOM_STEP};
use crate::error::{PreviewError, Result};
use crate::source::InputMode;

/// Zoom a filter asks the preview to start with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum PreviewFactor {
    /// Free zoom; the user decides.
    #[default]
    Any,
    /// Fit the whole image inside the widget.
    FullImage,
    /// One screen pixel per image pixel.
    ActualSize,
    /// Multiple of the full-image fit ratio. Values `<= 1` behave like `ActualSize`.
    Factor(f64),
}

impl PreviewFactor {
    /// Decode the float encoding used by filter definitions
    /// (`-1` any, `0` full image, `1` actual size, anything else a factor).
    pub fn from_f64(value: f64) -> Self {
        if value < 0.0 {
            PreviewFactor::Any
        } else if value == 0.0 {
            PreviewFactor::FullImage
        } else if value == 1.0 {
            PreviewFactor::ActualSize
        } else {
            PreviewFactor::Factor(value)
        }
    }
}

impl fmt::Display for PreviewFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewFactor::Any => write!(f, "Any"),
            PreviewFactor::FullImage => write!(f, "Full image"),
            PreviewFactor::ActualSize => write!(f, "Actual size"),
            PreviewFactor::Factor(v) => write!(f, "Factor ({v})"),
        }
    }
}

/// Preview behavior settings, loadable from a TOML file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Quiet period after the last viewport change before a preview update is requested.
    pub debounce_ms: u64,
    pub max_zoom: f64,
    /// Multiplier applied per zoom step.
    pub zoom_step: f64,
    pub preview_factor: PreviewFactor,
    pub input_mode: InputMode,
    /// Hold the right mouse button to peek at the unprocessed image.
    pub right_click_peek: bool,
    /// Override for the directory holding the favorites file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faves_dir: Option<PathBuf>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: RESIZE_DELAY.as_millis() as u64,
            max_zoom: PREVIEW_MAX_ZOOM_FACTOR,
            zoom_step: ZOOM_STEP,
            preview_factor: PreviewFactor::default(),
            input_mode: InputMode::default(),
            right_click_peek: true,
            faves_dir: None,
        }
    }
}

impl PreviewConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the zoom arithmetic cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(PreviewError::InvalidConfig {
                field: "zoom_step",
                reason: format!("must be a finite number above 1, got {}", self.zoom_step),
            });
        }
        if !self.max_zoom.is_finite() || self.max_zoom <= 0.0 {
            return Err(PreviewError::InvalidConfig {
                field: "max_zoom",
                reason: format!("must be a finite positive number, got {}", self.max_zoom),
            });
        }
        if let PreviewFactor::Factor(f) = self.preview_factor {
            if !f.is_finite() || f <= 0.0 {
                return Err(PreviewError::InvalidConfig {
                    field: "preview_factor",
                    reason: format!("factor must be a finite positive number, got {f}"),
                });
            }
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
