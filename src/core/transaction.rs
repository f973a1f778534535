//! Transaction business logic - create, read, list and delete income/expense records.
//!
//! Transactions are immutable once written: there is no update path, so correcting one means
//! deleting it and recording a new one. The transaction type is validated before anything
//! touches storage, so a rejected request never leaves a row behind.

use crate::{
    core::{Page, validate_money},
    entities::{Transaction, transaction},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{debug, info, instrument};

/// Category stored when the caller does not supply one.
pub const DEFAULT_CATEGORY: &str = "other";

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl TransactionKind {
    /// Value stored in the `type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(Error::validation("Type must be 'income' or 'expense'")),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for [`create_transaction`].
///
/// `transaction_type` is kept as raw text so that an unknown value surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTransaction {
    /// Free text label
    pub description: String,
    /// Non-negative magnitude
    pub amount: f64,
    /// `"income"` or `"expense"`
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Optional tag, defaults to [`DEFAULT_CATEGORY`]
    #[serde(default)]
    pub category: Option<String>,
}

/// Creates a new transaction after validating its type and amount.
///
/// # Errors
/// Returns [`Error::Validation`] if the type is not `income`/`expense` or the amount is
/// negative or not finite, and [`Error::Database`] if the insert fails.
#[instrument(skip(db))]
pub async fn create_transaction(
    db: &DatabaseConnection,
    input: NewTransaction,
) -> Result<transaction::Model> {
    let kind: TransactionKind = input.transaction_type.parse()?;
    validate_money("amount", input.amount)?;

    let model = transaction::ActiveModel {
        description: Set(input.description),
        amount: Set(input.amount),
        transaction_type: Set(kind.as_str().to_string()),
        category: Set(input
            .category
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(id = created.id, kind = %kind, "Transaction created");
    Ok(created)
}

/// Lists transactions newest first, applying the pagination window.
#[instrument(skip(db))]
pub async fn list_transactions(
    db: &DatabaseConnection,
    page: Page,
) -> Result<Vec<transaction::Model>> {
    let transactions = Transaction::find()
        .order_by_desc(transaction::Column::CreatedAt)
        .order_by_desc(transaction::Column::Id)
        .offset(page.offset())
        .limit(page.row_limit())
        .all(db)
        .await?;
    debug!(count = transactions.len(), "Listed transactions");
    Ok(transactions)
}

/// Retrieves a transaction by id.
///
/// # Errors
/// Returns [`Error::TransactionNotFound`] if no row has this id.
pub async fn get_transaction(db: &DatabaseConnection, id: i64) -> Result<transaction::Model> {
    Transaction::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::TransactionNotFound { id })
}

/// Deletes a transaction. Deleting an id that is already gone is an error, not a no-op.
///
/// # Errors
/// Returns [`Error::TransactionNotFound`] if no row has this id.
#[instrument(skip(db))]
pub async fn delete_transaction(db: &DatabaseConnection, id: i64) -> Result<()> {
    let result = Transaction::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::TransactionNotFound { id });
    }
    info!(id, "Transaction deleted");
    Ok(())
}
