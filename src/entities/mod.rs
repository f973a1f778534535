//! Entity module - Contains the SeaORM entity definitions for the database.
//! The two tables are independent; there are no relations between them.

pub mod subscription;
pub mod transaction;

pub use subscription::{
    Column as SubscriptionColumn, Entity as Subscription, Model as SubscriptionModel,
};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};
