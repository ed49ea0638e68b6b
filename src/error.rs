use thiserror::Error;

/// Errors raised at the fallible edges of the canvas: startup and export.
///
/// Stroke operations themselves never fail; every input they see comes from
/// trusted pointer events and panel controls.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("Invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[cfg(target_arch = "wasm32")]
    #[error("Browser error: {0}")]
    Web(String),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
