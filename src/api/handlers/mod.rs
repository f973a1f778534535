//! Route handlers (general, transactions, subscriptions, summary).

/// Service banner and health check
pub mod general;
/// Subscription endpoints
pub mod subscriptions;
/// Cross-resource summary endpoints
pub mod summary;
/// Transaction endpoints
pub mod transactions;

use serde::Serialize;

/// Plain confirmation body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
