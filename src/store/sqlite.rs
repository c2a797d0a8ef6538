//! SQLite order store.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Order, OrderItem, Payment};
use crate::store::{OrderStore, StoreError, StoreResult};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS orders (
        id TEXT PRIMARY KEY,
        project_id TEXT NOT NULL,
        account_id TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'quote',
        subtotal_cents INTEGER NOT NULL DEFAULT 0,
        tax_cents INTEGER NOT NULL DEFAULT 0,
        total_cents INTEGER NOT NULL DEFAULT 0,
        currency TEXT NOT NULL DEFAULT 'AUD',
        invoice_number TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS orders_account_idx ON orders (account_id, created_at);
    CREATE TABLE IF NOT EXISTS order_items (
        id TEXT PRIMARY KEY,
        order_id TEXT NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
        description TEXT NOT NULL,
        quantity INTEGER NOT NULL DEFAULT 1,
        unit_price_cents INTEGER NOT NULL,
        metadata TEXT NOT NULL DEFAULT '{}'
    );
    CREATE TABLE IF NOT EXISTS payments (
        id TEXT PRIMARY KEY,
        order_id TEXT NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
        provider TEXT NOT NULL,
        provider_ref TEXT,
        amount_cents INTEGER NOT NULL,
        currency TEXT NOT NULL DEFAULT 'AUD',
        status TEXT NOT NULL DEFAULT 'pending',
        received_at TEXT,
        created_at TEXT NOT NULL
    );";

/// Orders kept in a SQLite database file.
pub struct SqliteOrderStore {
    conn: Mutex<Connection>,
}

impl SqliteOrderStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        debug!("Opening order database {}", path.display());
        Self::init(Connection::open(path)?)
    }

    /// An in-memory database, mostly for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&conn)
    }
}

impl std::fmt::Debug for SqliteOrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteOrderStore").finish_non_exhaustive()
    }
}

fn timestamp(value: DateTime<Utc>) -> String {
    // fixed width so text order matches time order
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_uuid(column: &'static str, value: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(value).map_err(|_| StoreError::InvalidColumn {
        column,
        value: value.to_string(),
    })
}

fn parse_time(column: &'static str, value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|_| StoreError::InvalidColumn {
            column,
            value: value.to_string(),
        })
}

/// Raw order columns as stored.
struct OrderRow {
    id: String,
    project_id: String,
    account_id: String,
    status: String,
    subtotal_cents: i64,
    tax_cents: i64,
    total_cents: i64,
    currency: String,
    invoice_number: Option<String>,
    created_at: String,
    updated_at: String,
}

impl OrderRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            project_id: row.get(1)?,
            account_id: row.get(2)?,
            status: row.get(3)?,
            subtotal_cents: row.get(4)?,
            tax_cents: row.get(5)?,
            total_cents: row.get(6)?,
            currency: row.get(7)?,
            invoice_number: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    fn into_order(self) -> StoreResult<Order> {
        Ok(Order {
            id: parse_uuid("orders.id", &self.id)?,
            project_id: parse_uuid("orders.project_id", &self.project_id)?,
            account_id: parse_uuid("orders.account_id", &self.account_id)?,
            status: self.status,
            subtotal_cents: self.subtotal_cents,
            tax_cents: self.tax_cents,
            total_cents: self.total_cents,
            currency: self.currency,
            invoice_number: self.invoice_number,
            created_at: parse_time("orders.created_at", &self.created_at)?,
            updated_at: parse_time("orders.updated_at", &self.updated_at)?,
        })
    }
}

impl OrderStore for SqliteOrderStore {
    fn orders_for_account(&self, account_id: Uuid) -> StoreResult<Vec<Order>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, project_id, account_id, status, subtotal_cents, tax_cents,
                        total_cents, currency, invoice_number, created_at, updated_at
                 FROM orders WHERE account_id = ?1 ORDER BY created_at DESC",
            )?;
            let rows = stmt
                .query_map(params![account_id.to_string()], OrderRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows.into_iter().map(OrderRow::into_order).collect()
        })
    }

    fn items_for_order(&self, order_id: Uuid) -> StoreResult<Vec<OrderItem>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, description, quantity, unit_price_cents, metadata
                 FROM order_items WHERE order_id = ?1 ORDER BY rowid",
            )?;
            let rows = stmt
                .query_map(params![order_id.to_string()], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(|(id, description, quantity, unit_price_cents, metadata)| {
                    Ok(OrderItem {
                        id: parse_uuid("order_items.id", &id)?,
                        order_id,
                        description,
                        quantity,
                        unit_price_cents,
                        metadata: serde_json::from_str(&metadata)?,
                    })
                })
                .collect()
        })
    }

    fn payments_for_order(&self, order_id: Uuid) -> StoreResult<Vec<Payment>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, provider, provider_ref, amount_cents, currency, status,
                        received_at, created_at
                 FROM payments WHERE order_id = ?1 ORDER BY created_at",
            )?;
            let rows = stmt
                .query_map(params![order_id.to_string()], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, Option<String>>(6)?,
                        row.get::<_, String>(7)?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter()
                .map(
                    |(id, provider, provider_ref, amount_cents, currency, status, received_at, created_at)| {
                        Ok(Payment {
                            id: parse_uuid("payments.id", &id)?,
                            order_id,
                            provider,
                            provider_ref,
                            amount_cents,
                            currency,
                            status,
                            received_at: received_at
                                .as_deref()
                                .map(|value| parse_time("payments.received_at", value))
                                .transpose()?,
                            created_at: parse_time("payments.created_at", &created_at)?,
                        })
                    },
                )
                .collect()
        })
    }

    fn insert_order(&self, order: &Order) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO orders (id, project_id, account_id, status, subtotal_cents, tax_cents,
                                     total_cents, currency, invoice_number, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    order.id.to_string(),
                    order.project_id.to_string(),
                    order.account_id.to_string(),
                    order.status,
                    order.subtotal_cents,
                    order.tax_cents,
                    order.total_cents,
                    order.currency,
                    order.invoice_number,
                    timestamp(order.created_at),
                    timestamp(order.updated_at),
                ],
            )?;
            Ok(())
        })
    }

    fn insert_item(&self, item: &OrderItem) -> StoreResult<()> {
        let metadata = serde_json::to_string(&item.metadata)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO order_items (id, order_id, description, quantity, unit_price_cents, metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    item.id.to_string(),
                    item.order_id.to_string(),
                    item.description,
                    item.quantity,
                    item.unit_price_cents,
                    metadata,
                ],
            )?;
            Ok(())
        })
    }

    fn insert_payment(&self, payment: &Payment) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO payments (id, order_id, provider, provider_ref, amount_cents, currency,
                                       status, received_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    payment.id.to_string(),
                    payment.order_id.to_string(),
                    payment.provider,
                    payment.provider_ref,
                    payment.amount_cents,
                    payment.currency,
                    payment.status,
                    payment.received_at.map(timestamp),
                    timestamp(payment.created_at),
                ],
            )?;
            Ok(())
        })
    }
}
