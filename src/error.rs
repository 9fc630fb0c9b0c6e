use thiserror::Error;

#[derive(Error, Debug)]
pub enum CenterError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Duplicate location exists: {address}")]
    Duplicate { address: String },

    #[error("Location not found with id: {id}")]
    NotFound { id: i64 },

    #[error("Geocoding failed: {message}")]
    Geocoding { message: String },

    #[error("Directions request failed: {message}")]
    Directions { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

impl CenterError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CenterError::InvalidArgument(message.into())
    }

    pub fn database(context: &str, err: impl std::fmt::Display) -> Self {
        CenterError::Database {
            message: format!("{context}: {err}"),
        }
    }

    /// Errors caused by the caller's input rather than by an outside system.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            CenterError::InvalidArgument(_)
                | CenterError::Duplicate { .. }
                | CenterError::NotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CenterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_errors_are_classified() {
        assert!(CenterError::invalid("bad").is_argument_error());
        assert!(CenterError::NotFound { id: 3 }.is_argument_error());
        assert!(CenterError::Duplicate {
            address: "a".to_string()
        }
        .is_argument_error());
        assert!(!CenterError::Geocoding {
            message: "down".to_string()
        }
        .is_argument_error());
        assert!(!CenterError::database("insert", "locked").is_argument_error());
    }

    #[test]
    fn not_found_message_names_the_id() {
        let err = CenterError::NotFound { id: 42 };
        assert_eq!(err.to_string(), "Location not found with id: 42");
    }
}
