use thiserror::Error;

#[derive(Debug, Error)]
pub enum TryOnError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid header value for {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("Image encoding error: {0}")]
    ImageEncode(#[from] image::ImageError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Logger error: {0}")]
    Logger(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TryOnError>;

/// Why a response body could not be turned into a typed field.
///
/// These never reach the caller of `try_on`; the affected field is left
/// empty and the reason is logged.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("body is not a decodable image: {0}")]
    Image(#[from] image::ImageError),

    #[error("body is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON body has no `detail` field")]
    MissingDetail,

    #[error("seed header is not an integer: {0:?}")]
    Seed(String),
}
