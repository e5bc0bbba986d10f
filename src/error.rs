//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error handling for the Service Registry
//!
//! This module provides error types and result aliases for the service registry.

use thiserror::Error;

/// Result type for service registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Service Registry error types
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Storage error
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Validation error
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Service not found
    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    /// Precondition failed
    ///
    /// The caller assumed prior existence of a service that was never
    /// registered. Distinct from not-found: the caller's state assumption
    /// is wrong, not the resource reference.
    #[error("Precondition failed: {message}")]
    PreconditionFailed { message: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Network error
    #[error("Network error: {message}")]
    Network { message: String },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Timeout error
    #[error("Timeout error: {message}")]
    Timeout { message: String },

    /// Service unavailable
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },
}

impl RegistryError {
    /// Create a configuration error
    pub fn config(message: &str) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Create a storage error
    pub fn storage(message: &str) -> Self {
        Self::Storage {
            message: message.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(message: &str) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    /// Create a precondition failed error
    pub fn precondition_failed(message: &str) -> Self {
        Self::PreconditionFailed {
            message: message.to_string(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: &str) -> Self {
        Self::Serialization {
            message: message.to_string(),
        }
    }

    /// Create a network error
    pub fn network(message: &str) -> Self {
        Self::Network {
            message: message.to_string(),
        }
    }

    /// Create an internal error
    pub fn internal(message: &str) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Create a timeout error
    pub fn timeout(message: &str) -> Self {
        Self::Timeout {
            message: message.to_string(),
        }
    }

    /// Create a service unavailable error
    pub fn service_unavailable(message: &str) -> Self {
        Self::ServiceUnavailable {
            message: message.to_string(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. }
                | Self::Network { .. }
                | Self::Timeout { .. }
                | Self::ServiceUnavailable { .. }
        )
    }

    /// Get the error code for HTTP responses
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Config { .. } => 400,
            Self::Validation { .. } => 400,
            Self::ServiceNotFound(_) => 404,
            Self::PreconditionFailed { .. } => 428,
            Self::Timeout { .. } => 408,
            Self::ServiceUnavailable { .. } => 503,
            Self::Network { .. } => 502,
            Self::Storage { .. } => 500,
            Self::Serialization { .. } => 500,
            Self::Internal { .. } => 500,
        }
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for RegistryError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = RegistryError::config("test error");
        assert!(matches!(error, RegistryError::Config { .. }));

        let error = RegistryError::storage("storage error");
        assert!(matches!(error, RegistryError::Storage { .. }));

        let error = RegistryError::validation("validation error");
        assert!(matches!(error, RegistryError::Validation { .. }));
    }

    #[test]
    fn test_error_retryable() {
        let error = RegistryError::Storage {
            message: "storage error".to_string(),
        };
        assert!(error.is_retryable());

        let error = RegistryError::Validation {
            message: "validation error".to_string(),
        };
        assert!(!error.is_retryable());

        let error = RegistryError::PreconditionFailed {
            message: "no such service".to_string(),
        };
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_http_status_codes() {
        let error = RegistryError::Validation {
            message: "validation error".to_string(),
        };
        assert_eq!(error.http_status_code(), 400);

        let error = RegistryError::ServiceNotFound("test".to_string());
        assert_eq!(error.http_status_code(), 404);

        let error = RegistryError::PreconditionFailed {
            message: "no such service".to_string(),
        };
        assert_eq!(error.http_status_code(), 428);

        let error = RegistryError::Internal {
            message: "internal error".to_string(),
        };
        assert_eq!(error.http_status_code(), 500);
    }
}
