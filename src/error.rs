//! Error types for packtrain operations.
//!
//! This module defines [`PacktrainError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PacktrainError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PacktrainError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users
//! - The core never retries or recovers locally; errors propagate unmodified
//!   to the CLI layer, which translates them into exit codes

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for packtrain operations.
#[derive(Debug, Error)]
pub enum PacktrainError {
    /// Requested integration name is not in the catalog.
    #[error("No integration named '{name}'. Known integrations: {}", .known.join(", "))]
    UnknownIntegration { name: String, known: Vec<String> },

    /// A required package is absent from the installed set.
    #[error(
        "Integration '{integration}' is not installed: package '{package}' was not \
         found in the environment. Install it with `pip install {distribution}[{integration}]`"
    )]
    MissingDependency {
        integration: String,
        package: String,
        distribution: String,
    },

    /// A requirement string does not match the package-name grammar.
    #[error("Malformed requirement '{spec}' in integration '{integration}'")]
    InvalidRequirement { integration: String, spec: String },

    /// The installed-package query failed or produced unparsable output.
    #[error("Failed to query installed packages: {message}")]
    EnvironmentQuery { message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for packtrain operations.
pub type Result<T> = std::result::Result<T, PacktrainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_integration_lists_known_names() {
        let err = PacktrainError::UnknownIntegration {
            name: "k8s".into(),
            known: vec!["aws".into(), "gcp".into(), "all".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("k8s"));
        assert!(msg.contains("aws"));
        assert!(msg.contains("gcp"));
        assert!(msg.contains("all"));
    }

    #[test]
    fn missing_dependency_names_package_and_extra() {
        let err = PacktrainError::MissingDependency {
            integration: "aws".into(),
            package: "boto3".into(),
            distribution: "packtrain".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("boto3"));
        assert!(msg.contains("pip install packtrain[aws]"));
    }

    #[test]
    fn invalid_requirement_displays_spec() {
        let err = PacktrainError::InvalidRequirement {
            integration: "custom".into(),
            spec: "==1.0".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("==1.0"));
        assert!(msg.contains("custom"));
    }

    #[test]
    fn environment_query_displays_message() {
        let err = PacktrainError::EnvironmentQuery {
            message: "pip freeze exited with code 1".into(),
        };
        assert!(err.to_string().contains("pip freeze exited with code 1"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = PacktrainError::ConfigNotFound {
            path: PathBuf::from("/foo/.packtrain.yml"),
        };
        assert!(err.to_string().contains("/foo/.packtrain.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = PacktrainError::ConfigParse {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = PacktrainError::ConfigValidation {
            message: "the integration name 'all' is reserved".into(),
        };
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PacktrainError = io_err.into();
        assert!(matches!(err, PacktrainError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PacktrainError::EnvironmentQuery {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
