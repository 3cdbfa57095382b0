use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
