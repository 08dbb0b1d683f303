//! Error types for hup-config.

use std::path::PathBuf;

/// Result type alias for hup-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or reloading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file was read but could not be decoded.
    ///
    /// Fields the decoder wrote before failing stay written; the cycle is
    /// aborted without rollback.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        /// Path the bytes were read from.
        path: PathBuf,
        /// The underlying decode failure.
        source: DecodeError,
    },

    /// Environment overrides could not be decoded.
    #[error("failed to decode environment overrides: {0}")]
    EnvDecode(#[source] DecodeError),

    /// One or more required fields were still unset after the merge.
    #[error("missing required settings: {}", .fields.join(", "))]
    MissingRequired {
        /// Names of the unset required fields, in declaration order.
        fields: Vec<&'static str>,
    },

    /// A handle was constructed with an empty source path.
    #[error("settings source path is empty")]
    EmptySource,

    /// The reload signal handler could not be registered.
    #[error("failed to register reload signal handler: {0}")]
    Signal(#[source] std::io::Error),
}

/// Failure reported by a decode collaborator.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input as a whole was malformed.
    #[error("malformed document: {0}")]
    Document(String),

    /// A single field could not be decoded.
    #[error("field `{field}`: {reason}")]
    Field {
        /// The source key that failed (document key or environment variable).
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Reason a single field value was rejected by an apply function.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ValueError(
    /// The reason text.
    pub String,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_message_enumerates_names_in_order() {
        let err = ConfigError::MissingRequired {
            fields: vec!["port", "database_url"],
        };
        assert_eq!(
            err.to_string(),
            "missing required settings: port, database_url"
        );
    }

    #[test]
    fn decode_error_names_the_path() {
        let err = ConfigError::Decode {
            path: PathBuf::from("/etc/app.yaml"),
            source: DecodeError::Field {
                field: "port".to_string(),
                reason: "invalid type".to_string(),
            },
        };
        let message = err.to_string();
        assert!(message.contains("/etc/app.yaml"));
        assert!(message.contains("port"));
    }
}
