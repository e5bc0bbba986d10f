//! API error handling
//!
//! This module contains the API error types and error handling logic.

use crate::error::RegistryError;

/// API error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Not found
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Precondition required
    #[error("Precondition required: {message}")]
    PreconditionRequired { message: String },

    /// Validation error
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Internal server error
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: &str) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: &str) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    /// Create a precondition required error
    pub fn precondition_required(message: &str) -> Self {
        Self::PreconditionRequired {
            message: message.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(message: &str) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    /// Create an internal error
    pub fn internal(message: &str) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Convert from registry error
    pub fn from_registry_error(error: RegistryError) -> Self {
        match error {
            RegistryError::Config { message } => Self::BadRequest { message },
            RegistryError::Validation { message } => Self::Validation { message },
            RegistryError::ServiceNotFound(id) => Self::NotFound {
                message: format!("Service not found: {}", id),
            },
            RegistryError::PreconditionFailed { message } => Self::PreconditionRequired { message },
            RegistryError::Serialization { message } => Self::BadRequest { message },
            RegistryError::Network { message } => Self::Internal { message },
            RegistryError::Storage { message } => Self::Internal { message },
            RegistryError::Timeout { message } => Self::Internal { message },
            RegistryError::ServiceUnavailable { message } => Self::Internal { message },
            RegistryError::Internal { message } => Self::Internal { message },
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest { ref message } => {
                (axum::http::StatusCode::BAD_REQUEST, message.clone())
            }
            ApiError::NotFound { ref message } => {
                (axum::http::StatusCode::NOT_FOUND, message.clone())
            }
            ApiError::PreconditionRequired { ref message } => {
                (axum::http::StatusCode::PRECONDITION_REQUIRED, message.clone())
            }
            ApiError::Validation { ref message } => {
                (axum::http::StatusCode::BAD_REQUEST, message.clone())
            }
            ApiError::Internal { ref message } => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                message.clone(),
            ),
        };

        let body = axum::response::Json(crate::api::responses::ErrorResponse {
            error: self.to_string(),
            message,
            status_code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_maps_to_428() {
        let error = ApiError::from_registry_error(RegistryError::precondition_failed(
            "cannot set status for unregistered service(id=abc)",
        ));
        assert!(matches!(error, ApiError::PreconditionRequired { .. }));

        let response = axum::response::IntoResponse::into_response(error);
        assert_eq!(response.status(), axum::http::StatusCode::PRECONDITION_REQUIRED);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let error =
            ApiError::from_registry_error(RegistryError::ServiceNotFound("abc".to_string()));

        let response = axum::response::IntoResponse::into_response(error);
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_maps_to_500() {
        let error = ApiError::from_registry_error(RegistryError::storage("connection reset"));

        let response = axum::response::IntoResponse::into_response(error);
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
