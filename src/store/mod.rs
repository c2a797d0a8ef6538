//! Order persistence.
//!
//! The orders API reads through the [`OrderStore`] trait. The server uses
//! [`SqliteOrderStore`]; tests use [`MemoryOrderStore`].

pub mod memory;
pub mod sqlite;

pub use memory::MemoryOrderStore;
pub use sqlite::SqliteOrderStore;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Order, OrderItem, Payment};

/// Errors raised by order stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite failure
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value does not parse back
    #[error("invalid {column} in stored row: {value}")]
    InvalidColumn {
        /// Column name
        column: &'static str,
        /// Raw stored text
        value: String,
    },

    /// Item metadata is not JSON
    #[error("metadata is not valid JSON: {0}")]
    Metadata(#[from] serde_json::Error),

    /// A thread panicked while holding the store lock
    #[error("store lock poisoned")]
    Poisoned,
}

/// Result type of order stores.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage for orders, their items and payments.
///
/// Calls are blocking; async callers run them on a blocking thread.
pub trait OrderStore: Send + Sync {
    /// Orders of an account, newest first.
    fn orders_for_account(&self, account_id: Uuid) -> StoreResult<Vec<Order>>;

    /// Line items of one order.
    fn items_for_order(&self, order_id: Uuid) -> StoreResult<Vec<OrderItem>>;

    /// Payments recorded against one order.
    fn payments_for_order(&self, order_id: Uuid) -> StoreResult<Vec<Payment>>;

    /// Stores a new order.
    fn insert_order(&self, order: &Order) -> StoreResult<()>;

    /// Stores a line item.
    fn insert_item(&self, item: &OrderItem) -> StoreResult<()>;

    /// Records a payment.
    fn insert_payment(&self, payment: &Payment) -> StoreResult<()>;
}
