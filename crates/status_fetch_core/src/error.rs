use thiserror::Error;

/// Failure of any pipeline step.
///
/// `Display` renders only the underlying message so callers see the same text
/// the failing collaborator reported. The variant is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessingError {
    #[error("{0}")]
    Fetch(String),
    #[error("{0}")]
    LinkNotFound(String),
    #[error("{0}")]
    Parse(String),
    #[error("{0}")]
    Serialize(String),
    #[error("{0}")]
    Configuration(String),
}

impl ProcessingError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    pub fn link_not_found(selector: &str) -> Self {
        Self::LinkNotFound(format!(
            "no element matching '{selector}' with an href on status page"
        ))
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Fetch(message)
            | Self::LinkNotFound(message)
            | Self::Parse(message)
            | Self::Serialize(message)
            | Self::Configuration(message) => message,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch_failed",
            Self::LinkNotFound(_) => "link_not_found",
            Self::Parse(_) => "parse_failed",
            Self::Serialize(_) => "serialization_error",
            Self::Configuration(_) => "misconfiguration",
        }
    }
}

impl From<serde_json::Error> for ProcessingError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialize(error.to_string())
    }
}
