//! Transaction entity - A single recorded income or expense.
//!
//! The `type` column holds `"income"` or `"expense"`; the Rust field is named
//! `transaction_type` to avoid the keyword.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Free text label (e.g., "Salary", "Groceries")
    pub description: String,
    /// Non-negative magnitude; the sign is carried by `transaction_type`
    pub amount: f64,
    /// Either `"income"` or `"expense"`
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Free text tag, `"other"` when not given
    pub category: String,
    /// When the transaction was recorded
    pub created_at: DateTimeUtc,
    /// When the transaction was last modified, if ever
    pub updated_at: Option<DateTimeUtc>,
}

/// Transaction has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
