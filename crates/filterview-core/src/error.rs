use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Crop region is empty for image {width}x{height}")]
    EmptyCrop { width: u32, height: u32 },

    #[error("Input mode {0} provides no image")]
    NoInput(String),

    #[error("Cannot resolve user directories")]
    NoUserDirs,

    #[error("Cannot write favorites to {path}: {source}")]
    FavesWrite {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PreviewError>;
