//! Error types for the Plume core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boundary code for a model load failure.
pub const CODE_LOAD_FAILED: &str = "ERREUR_CHARGEMENT";
/// Boundary code for a generation attempted while the model is not ready.
pub const CODE_MODEL_NOT_READY: &str = "MODELE_NON_PRET";
/// Boundary code for a failure during streaming generation.
pub const CODE_GENERATION_FAILED: &str = "ERREUR_GENERATION";
/// Boundary code for failures outside the session lifecycle (storage, config).
pub const CODE_INTERNAL: &str = "ERREUR_INTERNE";

/// A shared error type for the Plume core and its collaborators.
///
/// Provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PlumeError {
    /// The inference engine could not be instantiated for a model.
    #[error("model load failed: {message}")]
    ModelLoad {
        message: String,
        detail: Option<String>,
    },

    /// Generation was requested while no model is ready to serve it.
    #[error("model is not ready")]
    ModelNotReady,

    /// A failure during call setup or streaming consumption.
    #[error("generation failed: {message}")]
    Generation {
        message: String,
        detail: Option<String>,
    },

    /// Entity not found error with type information
    #[error("entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (storage collaborator)
    #[error("data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlumeError {
    /// Creates a ModelLoad error
    pub fn model_load(message: impl Into<String>, detail: Option<String>) -> Self {
        Self::ModelLoad {
            message: message.into(),
            detail,
        }
    }

    /// Creates a Generation error
    pub fn generation(message: impl Into<String>, detail: Option<String>) -> Self {
        Self::Generation {
            message: message.into(),
            detail,
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a ModelNotReady error
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::ModelNotReady)
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The stable code surfaced at the application boundary for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ModelLoad { .. } => CODE_LOAD_FAILED,
            Self::ModelNotReady => CODE_MODEL_NOT_READY,
            Self::Generation { .. } => CODE_GENERATION_FAILED,
            _ => CODE_INTERNAL,
        }
    }

    /// Projects this error into the serializable shape delivered to observers.
    pub fn session_error(&self) -> SessionError {
        let detail = match self {
            Self::ModelLoad { detail, .. } | Self::Generation { detail, .. } => detail.clone(),
            _ => None,
        };
        SessionError {
            code: self.code().to_string(),
            message: self.to_string(),
            detail,
        }
    }
}

/// The error shape delivered to observers and UI collaborators.
///
/// `code` is one of the stable boundary codes; `message` is human-readable;
/// `detail` carries the underlying failure when one exists. A stored
/// `SessionError` is cleared only by an explicit caller action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionError {
    pub code: String,
    pub message: String,
    pub detail: Option<String>,
}

impl SessionError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            detail,
        }
    }
}

impl From<std::io::Error> for PlumeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PlumeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PlumeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PlumeError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (for engine implementations built on it)
impl From<anyhow::Error> for PlumeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, PlumeError>`.
pub type Result<T> = std::result::Result<T, PlumeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_codes() {
        assert_eq!(
            PlumeError::model_load("x", None).code(),
            "ERREUR_CHARGEMENT"
        );
        assert_eq!(PlumeError::ModelNotReady.code(), "MODELE_NON_PRET");
        assert_eq!(
            PlumeError::generation("x", None).code(),
            "ERREUR_GENERATION"
        );
    }

    #[test]
    fn test_session_error_carries_detail() {
        let err = PlumeError::generation("stream failed", Some("engine panicked".to_string()));
        let session_error = err.session_error();
        assert_eq!(session_error.code, CODE_GENERATION_FAILED);
        assert_eq!(session_error.detail.as_deref(), Some("engine panicked"));
        assert!(session_error.message.contains("stream failed"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PlumeError = io_err.into();
        assert!(matches!(err, PlumeError::Io { .. }));
    }
}
