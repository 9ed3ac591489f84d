//! Error types for recomendar operations.
//!
//! Only conditions that make a result impossible are errors: empty training
//! input, invalid hyperparameters, missing or corrupt model files. Expected
//! per-request misses (unknown item, no usable neighbors) are `Option::None`
//! at the scoring API, never an `Err`.

use std::fmt;

/// Main error type for recomendar operations.
///
/// Provides detailed context about failures including empty training input,
/// invalid hyperparameters, and model persistence problems.
///
/// # Examples
///
/// ```
/// use recomendar::error::RecomendarError;
///
/// let err = RecomendarError::EmptyInput {
///     context: "ratings".to_string(),
/// };
/// assert!(err.to_string().contains("Empty input"));
/// ```
#[derive(Debug)]
pub enum RecomendarError {
    /// Training input contained no rows.
    EmptyInput {
        /// What was empty (e.g. "ratings")
        context: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// No model file exists at the given path.
    ModelNotFound {
        /// Path that was probed
        path: String,
    },

    /// Invalid or corrupt model format.
    FormatError {
        /// Error description
        message: String,
    },

    /// Model blob was written with a schema version this build cannot read.
    SchemaMismatch {
        /// Version found in the blob header
        found: u16,
        /// Version this build reads
        supported: u16,
    },

    /// I/O error (permission denied, disk full, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for RecomendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecomendarError::EmptyInput { context } => {
                write!(f, "Empty input: {context}")
            }
            RecomendarError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            RecomendarError::ModelNotFound { path } => {
                write!(f, "Model file not found: {path}")
            }
            RecomendarError::FormatError { message } => {
                write!(f, "Invalid model format: {message}")
            }
            RecomendarError::SchemaMismatch { found, supported } => {
                write!(
                    f,
                    "Unsupported model schema: found version {found}, max supported {supported}"
                )
            }
            RecomendarError::Io(e) => write!(f, "I/O error: {e}"),
            RecomendarError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            RecomendarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RecomendarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecomendarError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RecomendarError {
    fn from(err: std::io::Error) -> Self {
        RecomendarError::Io(err)
    }
}

impl From<&str> for RecomendarError {
    fn from(msg: &str) -> Self {
        RecomendarError::Other(msg.to_string())
    }
}

impl From<String> for RecomendarError {
    fn from(msg: String) -> Self {
        RecomendarError::Other(msg)
    }
}

impl RecomendarError {
    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput {
            context: context.to_string(),
        }
    }

    /// Create an invalid hyperparameter error
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for RecomendarError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<RecomendarError> for &str {
    fn eq(&self, other: &RecomendarError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, RecomendarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        let err = RecomendarError::empty_input("ratings");
        assert_eq!(err, "Empty input: ratings");
    }

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = RecomendarError::invalid_hyperparameter("n_similar_items", 0, ">= 1");
        assert!(err.to_string().contains("Invalid hyperparameter"));
        assert!(err.to_string().contains("n_similar_items"));
        assert!(err.to_string().contains(">= 1"));
    }

    #[test]
    fn test_model_not_found_display() {
        let err = RecomendarError::ModelNotFound {
            path: "/tmp/missing.rcmd".to_string(),
        };
        assert_eq!(err, "Model file not found: /tmp/missing.rcmd");
    }

    #[test]
    fn test_format_error_display() {
        let err = RecomendarError::FormatError {
            message: "bad magic".to_string(),
        };
        assert!(err.to_string().contains("Invalid model format"));
        assert!(err.to_string().contains("bad magic"));
    }

    #[test]
    fn test_schema_mismatch_display() {
        let err = RecomendarError::SchemaMismatch {
            found: 9,
            supported: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("found version 9"));
        assert!(msg.contains("max supported 1"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RecomendarError = io_err.into();
        assert!(matches!(err, RecomendarError::Io(_)));
    }

    #[test]
    fn test_from_str_and_string() {
        let err: RecomendarError = "something went sideways".into();
        assert_eq!(err, "something went sideways");

        let err: RecomendarError = String::from("owned message").into();
        assert_eq!(err, "owned message");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = RecomendarError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(err.source().is_some());

        let err = RecomendarError::empty_input("ratings");
        assert!(err.source().is_none());
    }
}
