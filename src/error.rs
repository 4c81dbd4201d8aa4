use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Container is missing the document body at {0}")]
    MissingDocumentBody(&'static str),

    #[error("Malformed document container: {0}")]
    MalformedContainer(#[from] zip::result::ZipError),

    #[error("Markup error: {0}")]
    Markup(#[from] quick_xml::Error),

    #[error("Fingerprint cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Index operation failed: {0}")]
    IndexOperationFailed(String),

    #[error("Failed to persist fingerprint cache: {0}")]
    PersistenceFailed(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
