//! Domain models
//!
//! Plain serde value objects. Each model implements [`crate::Entity`] and
//! declares the closed operation-kind enum used to tag its audit records.

mod account;
mod card;
mod client;
mod transaction;

pub use account::{Account, AccountOperation, AccountStatus};
pub use card::{Card, CardOperation, CardStatus};
pub use client::{Client, ClientOperation};
pub use transaction::{Transaction, TransactionKind, TransactionOperation};
