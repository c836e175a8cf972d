use std::time::Duration;

/// Largest zoom factor the preview accepts (screen pixels per image pixel).
pub const PREVIEW_MAX_ZOOM_FACTOR: f64 = 40.0;

/// Zoom multiplier applied per wheel step or zoom button press.
pub const ZOOM_STEP: f64 = 1.2;

/// Delay between the last viewport change and the preview update request.
pub const RESIZE_DELAY: Duration = Duration::from_millis(400);

/// Rounding slack when deciding that the visible rect spans a whole image axis.
pub const VIEWPORT_EPSILON: f64 = 1e-9;

/// Wheel angle (in degrees) that counts as one zoom step.
pub const WHEEL_DEGREES_PER_STEP: f64 = 15.0;

/// Wheel angle deltas are reported in eighths of a degree.
pub const WHEEL_EIGHTHS_PER_DEGREE: f64 = 8.0;

/// Tolerance used when deciding whether the zoom matches the filter's default zoom.
pub const DEFAULT_ZOOM_TOLERANCE: f64 = 0.05;

/// File name of the favorites file inside the resources directory.
pub const FAVES_FILENAME: &str = "gmic_qt_faves.json";

/// File name of the pre-JSON favorites file inside the legacy resources directory.
pub const LEGACY_FAVES_FILENAME: &str = "gmic_qt_faves";

/// Suffix of the backup written next to the legacy favorites file.
pub const LEGACY_BACKUP_SUFFIX: &str = ".bak";
