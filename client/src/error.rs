use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend answered with status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid surface size {width}x{height}")]
    InvalidSurface { width: f64, height: f64 },
}

impl ClientError {
    /// Payload problems are recovered by clearing the overlay; everything else is dropped.
    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, ClientError::Decode(_))
    }
}
