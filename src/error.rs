use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Canonical store unavailable: {0}")]
    CanonicalStoreUnavailable(String),

    #[error("Malformed {source_name} record: {message}")]
    MalformedRecord { source_name: String, message: String },

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("API error: {message}")]
    Api { message: String },
}

pub type Result<T> = std::result::Result<T, MergeError>;
