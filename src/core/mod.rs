//! Core business logic - framework-agnostic record store and aggregation.
//!
//! Every operation takes an explicit database handle; nothing here holds connection state.

/// Storage connectivity check
pub mod health;
/// Subscription CRUD
pub mod subscription;
/// Aggregates over transactions and subscriptions
pub mod summary;
/// Transaction create/read/delete
pub mod transaction;

use crate::errors::{Error, Result};
use serde::Deserialize;

/// Offset-based pagination window for list reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Number of records to skip
    pub skip: u64,
    /// Maximum number of records to return
    pub limit: u64,
}

impl Page {
    /// Default number of records per page.
    pub const DEFAULT_LIMIT: u64 = 100;

    #[must_use]
    pub const fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// Largest offset or limit the storage driver accepts (it binds them as `i64`).
    pub const MAX_BOUND: u64 = i64::MAX as u64;

    /// Returns the same window with `limit` capped at `max` and both values within
    /// [`Page::MAX_BOUND`].
    #[must_use]
    pub fn clamped(self, max: u64) -> Self {
        Self {
            skip: self.offset(),
            limit: self.limit.min(max).min(Self::MAX_BOUND),
        }
    }

    /// `skip` as a bindable SQL offset.
    #[must_use]
    pub fn offset(self) -> u64 {
        self.skip.min(Self::MAX_BOUND)
    }

    /// `limit` as a bindable SQL limit.
    #[must_use]
    pub fn row_limit(self) -> u64 {
        self.limit.min(Self::MAX_BOUND)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Rejects monetary inputs that are negative, NaN or infinite.
pub(crate) fn validate_money(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::validation(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}
