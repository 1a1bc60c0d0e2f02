/// Error raised on the internal fetch/parse path of a source adapter.
///
/// Adapters never hand this to callers directly; it is converted into
/// [`Response::Failure`](crate::response::Response::Failure) at the operation boundary.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty response from {url}")]
    EmptyBody { url: String },

    #[error("Malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing field '{field}' in payload")]
    MissingField { field: String },

    #[error("Field '{field}' is not {expected}")]
    UnexpectedType { field: String, expected: &'static str },

    #[error("Unknown source: {0}")]
    UnknownSource(String),
}

impl SourceError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField { field: field.into() }
    }

    pub fn unexpected(field: impl Into<String>, expected: &'static str) -> Self {
        Self::UnexpectedType {
            field: field.into(),
            expected,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
