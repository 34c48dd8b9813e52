use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown emotion: {0}")]
    UnknownEmotion(String),

    #[error("Mood score out of range: expected 1-5, got {0}")]
    InvalidScore(i64),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
