//! Crate-wide error type

#[derive(Debug)]
pub enum TrendsError {
    /// Network or HTTP failure while paging through the registry
    Fetch(String),
    /// Partition file could not be read or written
    Storage(std::io::Error),
    /// A persisted row did not parse as `timestamp,total,local,remote,both`
    MalformedRecord { line: usize, reason: String },
    Serialization(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrendsError>;

impl From<std::io::Error> for TrendsError {
    fn from(err: std::io::Error) -> Self {
        TrendsError::Storage(err)
    }
}

impl From<serde_json::Error> for TrendsError {
    fn from(err: serde_json::Error) -> Self {
        TrendsError::Serialization(err)
    }
}

impl From<reqwest::Error> for TrendsError {
    fn from(err: reqwest::Error) -> Self {
        TrendsError::Fetch(err.to_string())
    }
}

impl std::fmt::Display for TrendsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendsError::Fetch(e) => write!(f, "Fetch error: {}", e),
            TrendsError::Storage(e) => write!(f, "Storage error: {}", e),
            TrendsError::MalformedRecord { line, reason } => {
                write!(f, "Malformed record on line {}: {}", line, reason)
            }
            TrendsError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for TrendsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrendsError::Storage(e) => Some(e),
            TrendsError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}
