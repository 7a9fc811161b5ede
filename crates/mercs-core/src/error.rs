use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Snapshot provider failed: {0}")]
    ProviderFailed(String),

    #[error("Preference writer stopped")]
    WriterStopped,

    #[error("Invalid task status: {0}")]
    InvalidTaskStatus(u8),

    #[error("Invalid scene mode: {0}")]
    InvalidSceneMode(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
