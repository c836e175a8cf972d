use std::fmt;

use filterview_core::config::PreviewFactor;

/// Filter applied by the preview renderer, with its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterChoice {
    Invert,
    Grayscale,
    Blur { sigma: f32 },
    Brighten { amount: i32 },
    Contrast { amount: f32 },
    Unsharpen { sigma: f32, threshold: i32 },
    Hue { degrees: i32 },
}

impl Default for FilterChoice {
    fn default() -> Self {
        Self::Blur { sigma: 2.0 }
    }
}

impl FilterChoice {
    /// One instance of each filter with default parameters.
    pub const ALL: &[Self] = &[
        Self::Invert,
        Self::Grayscale,
        Self::Blur { sigma: 2.0 },
        Self::Brighten { amount: 20 },
        Self::Contrast { amount: 15.0 },
        Self::Unsharpen {
            sigma: 1.5,
            threshold: 4,
        },
        Self::Hue { degrees: 90 },
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Invert => "Invert",
            Self::Grayscale => "Grayscale",
            Self::Blur { .. } => "Gaussian Blur",
            Self::Brighten { .. } => "Brighten",
            Self::Contrast { .. } => "Contrast",
            Self::Unsharpen { .. } => "Unsharp Mask",
            Self::Hue { .. } => "Hue Rotate",
        }
    }

    pub fn is_same_filter(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Command word stored in favorites.
    pub fn command(&self) -> &'static str {
        match self {
            Self::Invert => "invert",
            Self::Grayscale => "grayscale",
            Self::Blur { .. } => "blur",
            Self::Brighten { .. } => "brighten",
            Self::Contrast { .. } => "contrast",
            Self::Unsharpen { .. } => "unsharpen",
            Self::Hue { .. } => "huerotate",
        }
    }

    /// Parameter values in declaration order, as favorites store them.
    pub fn parameter_values(&self) -> Vec<String> {
        match *self {
            Self::Invert | Self::Grayscale => Vec::new(),
            Self::Blur { sigma } => vec![sigma.to_string()],
            Self::Brighten { amount } => vec![amount.to_string()],
            Self::Contrast { amount } => vec![amount.to_string()],
            Self::Unsharpen { sigma, threshold } => vec![sigma.to_string(), threshold.to_string()],
            Self::Hue { degrees } => vec![degrees.to_string()],
        }
    }

    /// Rebuild a filter from a favorite's command and parameter values.
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_command(command: &str, values: &[String]) -> Option<Self> {
        let default = *Self::ALL.iter().find(|f| f.command() == command)?;
        let num = |i: usize| values.get(i).and_then(|v| v.parse::<f32>().ok());
        Some(match default {
            Self::Invert | Self::Grayscale => default,
            Self::Blur { sigma } => Self::Blur {
                sigma: num(0).unwrap_or(sigma),
            },
            Self::Brighten { amount } => Self::Brighten {
                amount: num(0).map_or(amount, |v| v as i32),
            },
            Self::Contrast { amount } => Self::Contrast {
                amount: num(0).unwrap_or(amount),
            },
            Self::Unsharpen { sigma, threshold } => Self::Unsharpen {
                sigma: num(0).unwrap_or(sigma),
                threshold: num(1).map_or(threshold, |v| v as i32),
            },
            Self::Hue { degrees } => Self::Hue {
                degrees: num(0).map_or(degrees, |v| v as i32),
            },
        })
    }
}

impl fmt::Display for FilterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Preview factor selector.
#[derive(Clone, Copy, PartialEq, Default)]
pub enum PreviewFactorChoice {
    #[default]
    Any,
    FullImage,
    ActualSize,
    Double,
    Quadruple,
}

impl PreviewFactorChoice {
    pub const ALL: &[Self] = &[
        Self::Any,
        Self::FullImage,
        Self::ActualSize,
        Self::Double,
        Self::Quadruple,
    ];

    pub fn to_factor(self) -> PreviewFactor {
        match self {
            Self::Any => PreviewFactor::Any,
            Self::FullImage => PreviewFactor::FullImage,
            Self::ActualSize => PreviewFactor::ActualSize,
            Self::Double => PreviewFactor::Factor(2.0),
            Self::Quadruple => PreviewFactor::Factor(4.0),
        }
    }
}

impl fmt::Display for PreviewFactorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "Any"),
            Self::FullImage => write!(f, "Full Image"),
            Self::ActualSize => write!(f, "Actual Size (1:1)"),
            Self::Double => write!(f, "2x Fit"),
            Self::Quadruple => write!(f, "4x Fit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_fave_values() {
        let f = FilterChoice::Unsharpen {
            sigma: 3.5,
            threshold: 7,
        };
        let back = FilterChoice::from_command(f.command(), &f.parameter_values());
        assert_eq!(back, Some(f));
    }

    #[test]
    fn test_filter_from_command_defaults_missing_values() {
        assert_eq!(
            FilterChoice::from_command("blur", &[]),
            Some(FilterChoice::Blur { sigma: 2.0 })
        );
        assert_eq!(FilterChoice::from_command("sepia", &[]), None);
    }
}
