use thiserror::Error;

/// 顯示層固定的錯誤文字
pub const FETCH_FAILED_MESSAGE: &str =
    "Fail to fetch data. Make sure you are connected to the internet.";

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Geocoding API returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: '{field}' must be provided")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No city name provided")]
    EmptyRequest,

    #[error("No result found for \"{city}\"")]
    NoResultFound { city: String },

    #[error("Unknown session: {id}")]
    UnknownSession { id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ConfigurationIncomplete,
    EmptyRequest,
    TransportFailure,
    NoResultFound,
    WriteFailure,
    Session,
}

impl LookupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LookupError::Transport(_) | LookupError::HttpStatus { .. } => {
                ErrorCategory::TransportFailure
            }
            LookupError::Io(_) => ErrorCategory::WriteFailure,
            LookupError::Json(_) | LookupError::NoResultFound { .. } => {
                ErrorCategory::NoResultFound
            }
            LookupError::ConfigError { .. }
            | LookupError::MissingConfigError { .. }
            | LookupError::InvalidConfigValueError { .. } => {
                ErrorCategory::ConfigurationIncomplete
            }
            LookupError::EmptyRequest => ErrorCategory::EmptyRequest,
            LookupError::UnknownSession { .. } => ErrorCategory::Session,
        }
    }

    /// Text shown to the user in the results file.
    pub fn user_friendly_message(&self) -> String {
        match self {
            LookupError::Transport(_) | LookupError::HttpStatus { .. } => {
                FETCH_FAILED_MESSAGE.to_string()
            }
            LookupError::NoResultFound { city } => format!("No result found for \"{}\".", city),
            other => other.to_string(),
        }
    }

    /// Record text for a failed lookup: either the no-result message or
    /// the generic fetch failure. Details only go to the log.
    pub fn record_message(&self) -> String {
        match self {
            LookupError::NoResultFound { .. } => self.user_friendly_message(),
            _ => FETCH_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::ConfigurationIncomplete => {
                "Set ApiKey and ResultsSave in the configuration"
            }
            ErrorCategory::EmptyRequest => "Pass a city name to look up",
            ErrorCategory::TransportFailure => {
                "Check the network connection and that the API key is valid"
            }
            ErrorCategory::NoResultFound => "Try a different spelling or a larger place",
            ErrorCategory::WriteFailure => "Make sure the results directory is writable",
            ErrorCategory::Session => "Initialize the session before using it",
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let err = LookupError::HttpStatus { status: 401 };
        assert_eq!(err.user_friendly_message(), FETCH_FAILED_MESSAGE);
        assert_eq!(err.category(), ErrorCategory::TransportFailure);

        let err = LookupError::NoResultFound {
            city: "Atlantis".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "No result found for \"Atlantis\".");
    }

    #[test]
    fn test_record_message_has_two_shapes() {
        let err = LookupError::InvalidConfigValueError {
            field: "Endpoint".to_string(),
            value: "not a url".to_string(),
            reason: "Invalid URL format".to_string(),
        };
        assert_eq!(err.record_message(), FETCH_FAILED_MESSAGE);

        let err = LookupError::NoResultFound {
            city: "Atlantis".to_string(),
        };
        assert_eq!(err.record_message(), "No result found for \"Atlantis\".");
    }

    #[test]
    fn test_io_is_write_failure() {
        let err = LookupError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::WriteFailure);
    }
}
