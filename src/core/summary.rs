//! Summary generation business logic.
//!
//! Every figure here is recomputed from storage on each call; nothing is cached. Monetary
//! results are rounded half-to-even to cents as the last step, while per-subscription
//! normalization is done on the unrounded prices.

use crate::{
    core::{
        subscription::{BillingCycle, get_active_subscriptions},
        transaction::TransactionKind,
    },
    entities::{Subscription, Transaction, subscription, transaction},
    errors::Result,
};
use sea_orm::{PaginatorTrait, QuerySelect, prelude::*};
use serde::Serialize;
use tracing::{debug, instrument};

/// Income, expense and the difference between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    /// Sum of all income amounts
    pub total_income: f64,
    /// Sum of all expense amounts
    pub total_expense: f64,
    /// `total_income - total_expense`
    pub balance: f64,
}

/// Active subscription costs split by billing cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionBreakdown {
    /// Raw sum of monthly-cycle prices
    pub monthly_subscriptions_cost: f64,
    /// Raw sum of yearly-cycle prices
    pub yearly_subscriptions_cost: f64,
    /// Monthly sum plus one twelfth of the yearly sum
    pub monthly_equivalent: f64,
    /// Number of active subscriptions, whatever their cycle
    pub total_active_subscriptions: u64,
}

/// Dashboard snapshot combining transaction and subscription figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    /// Sum of all income amounts
    pub total_income: f64,
    /// Sum of all expense amounts
    pub total_expense: f64,
    /// Income minus expense
    pub balance: f64,
    /// Number of subscriptions flagged active
    pub active_subscriptions: u64,
    /// Monthly-equivalent cost of the active subscriptions
    pub monthly_subscriptions_cost: f64,
    /// Number of stored transactions of either type
    pub total_transactions: u64,
}

/// Rounds a monetary value to 2 decimal places, ties to even.
#[must_use]
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Sums the monthly-equivalent cost of the given subscriptions.
///
/// Callers pass the active set; the `active` flag is not consulted here. Normalization is
/// applied to each subscription before summing so that monthly and yearly cycles mix
/// correctly. Unknown cycles contribute zero.
#[must_use]
pub fn monthly_cost_of(subscriptions: &[subscription::Model]) -> f64 {
    subscriptions
        .iter()
        .map(|s| BillingCycle::parse(&s.billing_cycle).monthly_equivalent(s.price))
        .sum()
}

/// Sums `amount` over all transactions of the given kind. An empty set sums to zero.
#[instrument(skip(db))]
pub async fn total_by_type(db: &DatabaseConnection, kind: TransactionKind) -> Result<f64> {
    let total = Transaction::find()
        .select_only()
        .column_as(transaction::Column::Amount.sum(), "total")
        .filter(transaction::Column::TransactionType.eq(kind.as_str()))
        .into_tuple::<Option<f64>>()
        .one(db)
        .await?
        .flatten()
        .unwrap_or(0.0);
    debug!(total, "Summed transactions");
    Ok(round_currency(total))
}

/// Income, expense and balance in one call.
pub async fn transaction_summary(db: &DatabaseConnection) -> Result<TransactionSummary> {
    let total_income = total_by_type(db, TransactionKind::Income).await?;
    let total_expense = total_by_type(db, TransactionKind::Expense).await?;

    Ok(TransactionSummary {
        total_income,
        total_expense,
        balance: round_currency(total_income - total_expense),
    })
}

/// Total income minus total expense.
pub async fn balance(db: &DatabaseConnection) -> Result<f64> {
    Ok(transaction_summary(db).await?.balance)
}

/// Number of subscriptions flagged active.
pub async fn active_subscription_count(db: &DatabaseConnection) -> Result<u64> {
    Subscription::find()
        .filter(subscription::Column::Active.eq(true))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Monthly-equivalent cost of all active subscriptions.
pub async fn monthly_subscription_cost(db: &DatabaseConnection) -> Result<f64> {
    let active = get_active_subscriptions(db).await?;
    Ok(round_currency(monthly_cost_of(&active)))
}

/// Splits the active subscription cost into its monthly and yearly parts.
pub async fn monthly_subscriptions_breakdown(
    db: &DatabaseConnection,
) -> Result<SubscriptionBreakdown> {
    let active = get_active_subscriptions(db).await?;

    let mut monthly = 0.0;
    let mut yearly = 0.0;
    for sub in &active {
        match BillingCycle::parse(&sub.billing_cycle) {
            BillingCycle::Monthly => monthly += sub.price,
            BillingCycle::Yearly => yearly += sub.price,
            BillingCycle::Other(_) => {}
        }
    }

    Ok(SubscriptionBreakdown {
        monthly_subscriptions_cost: round_currency(monthly),
        yearly_subscriptions_cost: round_currency(yearly),
        monthly_equivalent: round_currency(monthly + yearly / 12.0),
        total_active_subscriptions: active.len() as u64,
    })
}

/// Builds the dashboard overview from the individual aggregates.
#[instrument(skip(db))]
pub async fn overview(db: &DatabaseConnection) -> Result<Overview> {
    let totals = transaction_summary(db).await?;
    let active_subscriptions = active_subscription_count(db).await?;
    let monthly_subscriptions_cost = monthly_subscription_cost(db).await?;
    let total_transactions = Transaction::find().count(db).await?;

    Ok(Overview {
        total_income: totals.total_income,
        total_expense: totals.total_expense,
        balance: totals.balance,
        active_subscriptions,
        monthly_subscriptions_cost,
        total_transactions,
    })
}
