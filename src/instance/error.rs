/// Errors that can occur while reading instance documents
#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    /// I/O error reading an instance file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed JSON document
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed TOML document
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Document root is not a key/value mapping
    #[error("Instance document root must be a mapping, found {0}")]
    NotAMapping(String),

    /// A flat key is used both as a value and as a prefix of another key
    #[error("Flat key '{0}' conflicts with another key")]
    KeyConflict(String),

    /// A flat key has an empty path segment
    #[error("Flat key '{0}' has an empty path segment")]
    InvalidKey(String),
}
