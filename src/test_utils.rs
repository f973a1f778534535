//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database and creating records with sensible defaults.

use crate::{
    core::{
        subscription::{self, SubscriptionFields},
        transaction::{self, NewTransaction, TransactionKind},
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a transaction input with no category.
pub fn new_transaction(description: &str, amount: f64, transaction_type: &str) -> NewTransaction {
    NewTransaction {
        description: description.to_string(),
        amount,
        transaction_type: transaction_type.to_string(),
        category: None,
    }
}

/// Creates a transaction of the given kind with description `"Test transaction"`.
pub async fn create_test_transaction(
    db: &DatabaseConnection,
    amount: f64,
    kind: TransactionKind,
) -> Result<entities::transaction::Model> {
    transaction::create_transaction(db, new_transaction("Test transaction", amount, kind.as_str()))
        .await
}

/// Creates a subscription with the given cycle and active flag, other fields defaulted.
pub async fn create_test_subscription(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    billing_cycle: &str,
    active: bool,
) -> Result<entities::subscription::Model> {
    subscription::create_subscription(
        db,
        SubscriptionFields::new(name, price)
            .with_billing_cycle(billing_cycle)
            .with_active(active),
    )
    .await
}
