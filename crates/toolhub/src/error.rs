use toolhub_core::snapshot::SnapshotError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid slot name: {0}")]
    InvalidSlot(String),
}

impl From<SnapshotError> for Error {
    fn from(err: SnapshotError) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Persistence(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
