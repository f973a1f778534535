//! Subscription entity - A recurring charge with a billing cycle.
//!
//! `billing_cycle` is stored verbatim. Only `"monthly"` and `"yearly"` take part in cost
//! aggregation; other values are kept but contribute nothing.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subscription database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    /// Unique identifier for the subscription
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g., "Netflix")
    pub name: String,
    /// Recurring price in `currency`
    pub price: f64,
    /// Currency code, `"USD"` by default
    pub currency: String,
    /// `"monthly"`, `"yearly"` or any other tolerated value
    pub billing_cycle: String,
    /// Inactive subscriptions are hidden from default listings and all cost totals
    pub active: bool,
    /// Next charge date; informational only
    pub next_payment: Option<DateTimeUtc>,
    /// When the subscription was created
    pub created_at: DateTimeUtc,
}

/// Subscription has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
