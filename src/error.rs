use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("smoothing radius must be positive and finite, got {0}")]
    InvalidSmoothing(f64),
    #[error("frame resolution must be non-zero, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
