//! Subscription business logic - Handles all subscription-related operations.
//!
//! Subscriptions are created and updated from the same [`SubscriptionFields`] struct: an
//! update is a full replace of every mutable field, never a merge. `created_at` is set once
//! and never changes.

use crate::{
    core::{Page, validate_money},
    entities::{Subscription, subscription},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Currency stored when the caller does not supply one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Recurrence of a subscription charge, as understood by cost aggregation.
///
/// The stored value is free text; anything other than `monthly` or `yearly` is kept as
/// [`BillingCycle::Other`] and contributes nothing to monthly cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingCycle {
    /// Charged every month
    Monthly,
    /// Charged once a year
    Yearly,
    /// Any other stored value
    Other(String),
}

impl BillingCycle {
    /// Classifies a stored billing cycle value. Matching is exact.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            other => Self::Other(other.to_string()),
        }
    }

    /// Converts a recurring price into its average monthly impact.
    #[must_use]
    pub fn monthly_equivalent(&self, price: f64) -> f64 {
        match self {
            Self::Monthly => price,
            Self::Yearly => price / 12.0,
            Self::Other(_) => 0.0,
        }
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_billing_cycle() -> String {
    "monthly".to_string()
}

const fn default_active() -> bool {
    true
}

/// Every mutable field of a subscription.
///
/// Used as the input of both [`create_subscription`] and [`update_subscription`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubscriptionFields {
    /// Human-readable name
    pub name: String,
    /// Recurring price, non-negative
    pub price: f64,
    /// Currency code
    #[serde(default = "default_currency")]
    pub currency: String,
    /// `"monthly"`, `"yearly"`, or any other value (stored but not costed)
    #[serde(default = "default_billing_cycle")]
    pub billing_cycle: String,
    /// Whether the subscription counts towards listings and totals
    #[serde(default = "default_active")]
    pub active: bool,
    /// Next charge date, informational only
    #[serde(default)]
    pub next_payment: Option<DateTime<Utc>>,
}

impl SubscriptionFields {
    /// Fields for a new subscription with every optional field at its default.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            currency: default_currency(),
            billing_cycle: default_billing_cycle(),
            active: default_active(),
            next_payment: None,
        }
    }

    /// Sets the billing cycle.
    #[must_use]
    pub fn with_billing_cycle(mut self, billing_cycle: impl Into<String>) -> Self {
        self.billing_cycle = billing_cycle.into();
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn validate(&self) -> Result<()> {
        validate_money("price", self.price)
    }

    fn write_into(self, model: &mut subscription::ActiveModel) {
        model.name = Set(self.name);
        model.price = Set(self.price);
        model.currency = Set(self.currency);
        model.billing_cycle = Set(self.billing_cycle);
        model.active = Set(self.active);
        model.next_payment = Set(self.next_payment);
    }
}

/// Creates a new subscription.
///
/// # Errors
/// Returns [`Error::Validation`] if the price is negative or not finite.
#[instrument(skip(db))]
pub async fn create_subscription(
    db: &DatabaseConnection,
    fields: SubscriptionFields,
) -> Result<subscription::Model> {
    fields.validate()?;

    let mut model = subscription::ActiveModel {
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    fields.write_into(&mut model);

    let created = model.insert(db).await?;
    info!(id = created.id, name = %created.name, "Subscription created");
    Ok(created)
}

/// Lists subscriptions newest first. With `active_only`, inactive ones are skipped.
#[instrument(skip(db))]
pub async fn list_subscriptions(
    db: &DatabaseConnection,
    page: Page,
    active_only: bool,
) -> Result<Vec<subscription::Model>> {
    let mut query = Subscription::find();
    if active_only {
        query = query.filter(subscription::Column::Active.eq(true));
    }

    let subscriptions = query
        .order_by_desc(subscription::Column::CreatedAt)
        .order_by_desc(subscription::Column::Id)
        .offset(page.offset())
        .limit(page.row_limit())
        .all(db)
        .await?;
    debug!(count = subscriptions.len(), "Listed subscriptions");
    Ok(subscriptions)
}

/// Retrieves all active subscriptions, unpaginated.
pub async fn get_active_subscriptions(
    db: &DatabaseConnection,
) -> Result<Vec<subscription::Model>> {
    Subscription::find()
        .filter(subscription::Column::Active.eq(true))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a subscription by id.
///
/// # Errors
/// Returns [`Error::SubscriptionNotFound`] if no row has this id.
pub async fn get_subscription(db: &DatabaseConnection, id: i64) -> Result<subscription::Model> {
    Subscription::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::SubscriptionNotFound { id })
}

/// Replaces every mutable field of an existing subscription.
///
/// # Errors
/// Returns [`Error::Validation`] for a bad price and [`Error::SubscriptionNotFound`] if
/// the id does not exist.
#[instrument(skip(db))]
pub async fn update_subscription(
    db: &DatabaseConnection,
    id: i64,
    fields: SubscriptionFields,
) -> Result<subscription::Model> {
    fields.validate()?;

    let mut model: subscription::ActiveModel = get_subscription(db, id).await?.into();
    fields.write_into(&mut model);

    let updated = model.update(db).await?;
    info!(id, "Subscription updated");
    Ok(updated)
}

/// Deletes a subscription. A second delete of the same id fails.
///
/// # Errors
/// Returns [`Error::SubscriptionNotFound`] if no row has this id.
#[instrument(skip(db))]
pub async fn delete_subscription(db: &DatabaseConnection, id: i64) -> Result<()> {
    let result = Subscription::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::SubscriptionNotFound { id });
    }
    info!(id, "Subscription deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{errors::ErrorKind, test_utils::*};
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_billing_cycle_parse() {
        assert_eq!(BillingCycle::parse("monthly"), BillingCycle::Monthly);
        assert_eq!(BillingCycle::parse("yearly"), BillingCycle::Yearly);
        assert_eq!(
            BillingCycle::parse("weekly"),
            BillingCycle::Other("weekly".to_string())
        );
        assert_eq!(
            BillingCycle::parse("Monthly"),
            BillingCycle::Other("Monthly".to_string())
        );
    }

    #[test]
    fn test_monthly_equivalent() {
        assert_eq!(BillingCycle::Monthly.monthly_equivalent(10.0), 10.0);
        assert_eq!(BillingCycle::Yearly.monthly_equivalent(120.0), 10.0);
        assert_eq!(
            BillingCycle::Other("weekly".to_string()).monthly_equivalent(999.0),
            0.0
        );
    }

    #[test]
    fn test_fields_deserialize_defaults() {
        let fields: SubscriptionFields =
            serde_json::from_str(r#"{"name": "Netflix", "price": 15.49}"#).unwrap();
        assert_eq!(fields, SubscriptionFields::new("Netflix", 15.49));
        assert_eq!(fields.currency, "USD");
        assert_eq!(fields.billing_cycle, "monthly");
        assert!(fields.active);
        assert!(fields.next_payment.is_none());
    }

    #[tokio::test]
    async fn test_create_subscription_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_subscription(&db, SubscriptionFields::new("Gym", -1.0)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        let result =
            create_subscription(&db, SubscriptionFields::new("Gym", f64::INFINITY)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_applies_defaults() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_subscription(&db, SubscriptionFields::new("Music", 9.99)).await?;

        assert_eq!(created.currency, "USD");
        assert_eq!(created.billing_cycle, "monthly");
        assert!(created.active);
        assert!(created.next_payment.is_none());

        let fetched = get_subscription(&db, created.id).await?;
        assert_eq!(fetched, created);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_cycle_is_stored() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_subscription(&db, "Paper", 5.0, "weekly", true).await?;
        assert_eq!(get_subscription(&db, created.id).await?.billing_cycle, "weekly");
        Ok(())
    }

    #[tokio::test]
    async fn test_list_active_only_filter() -> Result<()> {
        let db = setup_test_db().await?;
        let active = create_test_subscription(&db, "Active", 10.0, "monthly", true).await?;
        let inactive = create_test_subscription(&db, "Paused", 10.0, "monthly", false).await?;

        let listed = list_subscriptions(&db, Page::default(), true).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, active.id);

        let everything = list_subscriptions(&db, Page::default(), false).await?;
        assert_eq!(everything.len(), 2);
        assert_eq!(everything[0].id, inactive.id);
        assert_eq!(everything[1].id, active.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_pagination() -> Result<()> {
        let db = setup_test_db().await?;
        let mut ids = Vec::new();
        for name in ["a", "b", "c", "d", "e"] {
            ids.push(
                create_test_subscription(&db, name, 1.0, "monthly", true)
                    .await?
                    .id,
            );
        }

        let page = list_subscriptions(&db, Page::new(0, 2), true).await?;
        assert_eq!(page.iter().map(|s| s.id).collect::<Vec<_>>(), vec![ids[4], ids[3]]);

        let page = list_subscriptions(&db, Page::new(2, 2), true).await?;
        assert_eq!(page.iter().map(|s| s.id).collect::<Vec<_>>(), vec![ids[2], ids[1]]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_replaces_every_field() -> Result<()> {
        let db = setup_test_db().await?;
        let original = create_subscription(
            &db,
            SubscriptionFields {
                name: "Cloud".to_string(),
                price: 3.0,
                currency: "EUR".to_string(),
                billing_cycle: "monthly".to_string(),
                active: false,
                next_payment: Some(Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap()),
            },
        )
        .await?;

        // Omitted optional fields fall back to their defaults on replace
        let replacement = SubscriptionFields::new("Cloud Pro", 30.0).with_billing_cycle("yearly");
        let updated = update_subscription(&db, original.id, replacement).await?;

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.name, "Cloud Pro");
        assert_eq!(updated.price, 30.0);
        assert_eq!(updated.currency, "USD");
        assert_eq!(updated.billing_cycle, "yearly");
        assert!(updated.active);
        assert!(updated.next_payment.is_none());

        assert_eq!(get_subscription(&db, original.id).await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_subscription() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_subscription(&db, 77, SubscriptionFields::new("Ghost", 1.0)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::SubscriptionNotFound { id: 77 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_is_not_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_subscription(&db, "Once", 1.0, "monthly", true).await?;

        delete_subscription(&db, created.id).await?;
        assert!(matches!(
            get_subscription(&db, created.id).await.unwrap_err(),
            Error::SubscriptionNotFound { id: _ }
        ));
        assert!(matches!(
            delete_subscription(&db, created.id).await.unwrap_err(),
            Error::SubscriptionNotFound { id: _ }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_on_failing_storage() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Conn(sea_orm::RuntimeErr::Internal(
                "connection refused".to_string(),
            ))])
            .into_connection();

        let err = list_subscriptions(&db, Page::default(), true)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    }

    #[tokio::test]
    async fn test_update_on_failing_storage() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("disk I/O error".to_string())])
            .into_connection();

        let err = update_subscription(&db, 1, SubscriptionFields::new("Gym", 10.0))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    }
}
