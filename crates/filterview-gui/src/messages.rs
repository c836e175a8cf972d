use std::path::PathBuf;
use std::time::Duration;

use filterview_core::config::PreviewConfig;
use filterview_core::geometry::PixelSize;
use filterview_core::preview::RequestId;
use image::RgbaImage;

use crate::states::FilterChoice;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode an image file to become the preview source.
    LoadImage { path: PathBuf },

    /// Render the preview for one update request.
    Render {
        request: RequestId,
        /// Original crop of the visible rect.
        crop: RgbaImage,
        /// Size the rendered preview should have (the crop scaled down to screen resolution).
        target: PixelSize,
        filter: FilterChoice,
    },

    /// Save an image (the visible crop or the preview) to disk.
    SaveImage { path: PathBuf, image: RgbaImage },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    ImageLoaded {
        path: PathBuf,
        image: RgbaImage,
    },
    Preview {
        request: RequestId,
        image: RgbaImage,
        elapsed: Duration,
    },
    RenderFailed {
        request: RequestId,
        message: String,
    },
    ImageSaved {
        path: PathBuf,
    },
    ConfigImported {
        config: PreviewConfig,
    },
    Error {
        message: String,
    },
}
