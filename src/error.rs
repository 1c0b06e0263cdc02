use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaaniError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Unsupported file type")]
    UnsupportedMedia,

    #[error("Audio extraction failed: {0}")]
    AudioExtraction(String),

    #[error("Audio normalization failed: {0}")]
    Normalization(String),

    #[error("No speech detected in audio")]
    NoSpeech,

    #[error("Translation {src}->{dst} failed: {reason}")]
    Translation {
        src: String,
        dst: String,
        reason: String,
    },

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VaaniError>;
