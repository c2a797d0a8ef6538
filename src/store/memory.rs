//! In-memory order store.

use std::sync::RwLock;

use uuid::Uuid;

use crate::models::{Order, OrderItem, Payment};
use crate::store::{OrderStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    payments: Vec<Payment>,
}

/// Keeps orders in memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    tables: RwLock<Tables>,
}

impl MemoryOrderStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> StoreResult<T> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&tables))
    }

    fn write(&self, f: impl FnOnce(&mut Tables)) -> StoreResult<()> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        f(&mut tables);
        Ok(())
    }
}

impl OrderStore for MemoryOrderStore {
    fn orders_for_account(&self, account_id: Uuid) -> StoreResult<Vec<Order>> {
        self.read(|tables| {
            let mut orders: Vec<Order> = tables
                .orders
                .iter()
                .filter(|order| order.account_id == account_id)
                .cloned()
                .collect();
            orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            orders
        })
    }

    fn items_for_order(&self, order_id: Uuid) -> StoreResult<Vec<OrderItem>> {
        self.read(|tables| {
            tables
                .items
                .iter()
                .filter(|item| item.order_id == order_id)
                .cloned()
                .collect()
        })
    }

    fn payments_for_order(&self, order_id: Uuid) -> StoreResult<Vec<Payment>> {
        self.read(|tables| {
            tables
                .payments
                .iter()
                .filter(|payment| payment.order_id == order_id)
                .cloned()
                .collect()
        })
    }

    fn insert_order(&self, order: &Order) -> StoreResult<()> {
        self.write(|tables| tables.orders.push(order.clone()))
    }

    fn insert_item(&self, item: &OrderItem) -> StoreResult<()> {
        self.write(|tables| tables.items.push(item.clone()))
    }

    fn insert_payment(&self, payment: &Payment) -> StoreResult<()> {
        self.write(|tables| tables.payments.push(payment.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_orders_newest_first() {
        let store = MemoryOrderStore::new();
        let account = Uuid::new_v4();
        let now = Utc::now();
        let old = Order::new(Uuid::new_v4(), account).created_at(now - Duration::days(2));
        let new = Order::new(Uuid::new_v4(), account).created_at(now);
        let other = Order::new(Uuid::new_v4(), Uuid::new_v4());
        store.insert_order(&old).unwrap();
        store.insert_order(&new).unwrap();
        store.insert_order(&other).unwrap();

        let orders = store.orders_for_account(account).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, new.id);
        assert_eq!(orders[1].id, old.id);
    }

    #[test]
    fn test_items_and_payments_by_order() {
        let store = MemoryOrderStore::new();
        let order = Order::new(Uuid::new_v4(), Uuid::new_v4());
        store.insert_order(&order).unwrap();
        store.insert_item(&OrderItem::new(order.id, "Bronze plaque", 45_000)).unwrap();
        store.insert_item(&OrderItem::new(Uuid::new_v4(), "Other", 1)).unwrap();
        store.insert_payment(&Payment::new(order.id, "stripe", 45_000)).unwrap();

        assert_eq!(store.items_for_order(order.id).unwrap().len(), 1);
        assert_eq!(store.payments_for_order(order.id).unwrap().len(), 1);
        assert!(store.payments_for_order(Uuid::new_v4()).unwrap().is_empty());
    }
}
