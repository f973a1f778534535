//! Storage health check.
//!
//! [`check`] never fails: a storage error is folded into the report as
//! [`StorageStatus::Disconnected`] with a coarse error kind, and the driver message is only
//! logged.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};
use serde::Serialize;
use tracing::warn;

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Storage answered
    Healthy,
    /// Storage could not be reached or failed the query
    Unhealthy,
}

/// Coarse classification of a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageErrorKind {
    /// Could not open or acquire a connection
    Connection,
    /// A query was rejected or failed
    Query,
    /// A statement failed to execute
    Execution,
    /// Anything else the driver reports
    Other,
}

impl From<&DbErr> for StorageErrorKind {
    fn from(err: &DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::Connection,
            DbErr::Query(_) => Self::Query,
            DbErr::Exec(_) => Self::Execution,
            _ => Self::Other,
        }
    }
}

/// Whether storage answered the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum StorageStatus {
    /// `SELECT 1` succeeded
    Connected,
    /// `SELECT 1` failed; `kind` says roughly why
    Disconnected { kind: StorageErrorKind },
}

/// Result of a health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Overall verdict, derived from `storage`
    pub status: HealthStatus,
    /// Outcome of the storage round trip
    pub storage: StorageStatus,
}

impl HealthReport {
    /// True when the service can serve requests.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Runs `SELECT 1` against storage and reports the outcome.
pub async fn check(db: &DatabaseConnection) -> HealthReport {
    let backend = db.get_database_backend();
    match db
        .execute(Statement::from_string(backend, "SELECT 1"))
        .await
    {
        Ok(_) => HealthReport {
            status: HealthStatus::Healthy,
            storage: StorageStatus::Connected,
        },
        Err(err) => {
            warn!(error = %err, "Storage health check failed");
            HealthReport {
                status: HealthStatus::Unhealthy,
                storage: StorageStatus::Disconnected {
                    kind: StorageErrorKind::from(&err),
                },
            }
        }
    }
}
