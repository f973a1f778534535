//! Unified error type for the finance tracker.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants map onto three
//! caller-facing kinds (see [`ErrorKind`]): bad input, a missing record, or storage trouble.

use thiserror::Error;

/// Caller-facing classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; never retried
    Validation,
    /// The referenced record does not exist
    NotFound,
    /// The storage substrate failed or could not be reached
    StorageUnavailable,
    /// Anything else (configuration, I/O at startup)
    Internal,
}

impl ErrorKind {
    /// Stable snake-case name used in error bodies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::StorageUnavailable => "storage_unavailable",
            Self::Internal => "internal",
        }
    }
}

/// Every error the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before reaching storage
    #[error("{message}")]
    Validation { message: String },

    /// No transaction row has this id
    #[error("Transaction {id} not found")]
    TransactionNotFound { id: i64 },

    /// No subscription row has this id
    #[error("Subscription {id} not found")]
    SubscriptionNotFound { id: i64 },

    /// Any failure reported by the storage driver
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Unreadable or invalid configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Filesystem trouble, e.g. creating the database directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Classifies this error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::TransactionNotFound { .. } | Self::SubscriptionNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::Database(_) => ErrorKind::StorageUnavailable,
            Self::Config { .. } | Self::Io(_) => ErrorKind::Internal,
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
