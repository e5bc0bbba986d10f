//! Storage error types

use crate::error::RegistryError;

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Storage connection error
    #[error("Storage connection error: {message}")]
    Connection { message: String },

    /// Storage query error
    #[error("Storage query error: {message}")]
    Query { message: String },

    /// Storage transaction error
    #[error("Storage transaction error: {message}")]
    Transaction { message: String },

    /// Invalid record data read back from storage
    #[error("Invalid service record: {message}")]
    InvalidRecord { message: String },

    /// Storage configuration error
    #[error("Storage configuration error: {message}")]
    Configuration { message: String },
}

impl StorageError {
    /// Create a connection error
    pub fn connection(message: &str) -> Self {
        Self::Connection {
            message: message.to_string(),
        }
    }

    /// Create a query error
    pub fn query(message: &str) -> Self {
        Self::Query {
            message: message.to_string(),
        }
    }

    /// Create a transaction error
    pub fn transaction(message: &str) -> Self {
        Self::Transaction {
            message: message.to_string(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(message: &str) -> Self {
        Self::InvalidRecord {
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: &str) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => Self::Connection {
                message: err.to_string(),
            },
            _ => Self::Query {
                message: err.to_string(),
            },
        }
    }
}

impl From<StorageError> for RegistryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Connection { message } => RegistryError::Storage { message },
            StorageError::Query { message } => RegistryError::Storage { message },
            StorageError::Transaction { message } => RegistryError::Storage { message },
            StorageError::InvalidRecord { message } => RegistryError::Internal { message },
            StorageError::Configuration { message } => RegistryError::Config { message },
        }
    }
}
