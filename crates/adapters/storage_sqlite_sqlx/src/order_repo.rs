//! `SQLite` implementation of [`OrderRepository`].
//!
//! Orders and their items live in two tables. Reads fetch the matching
//! orders, then the items of exactly those order ids in a second query, and
//! stitch the two together in memory.

use std::collections::HashMap;
use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use tyrehub_app::ports::{OrderRepository, OrderScope};
use tyrehub_domain::error::TyreHubError;
use tyrehub_domain::id::{DealerId, OrderId, OrderItemId, TyreId, UserId};
use tyrehub_domain::order::{Order, OrderItem, OrderStatus};

use crate::codec::{decode_enum, decode_time, encode_time};
use crate::error::StorageError;

/// An order row without its items.
struct OrderRow(Order);

impl<'r> FromRow<'r, SqliteRow> for OrderRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let user_id: uuid::Uuid = row.try_get("user_id")?;
        let dealer_id: Option<uuid::Uuid> = row.try_get("dealer_id")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Order {
            id: OrderId::from_uuid(id),
            user_id: UserId::from_uuid(user_id),
            dealer_id: dealer_id.map(DealerId::from_uuid),
            status: decode_enum(&status)?,
            total_cents: row.try_get("total_cents")?,
            items: Vec::new(),
            created_at: decode_time(&created_at)?,
        }))
    }
}

struct ItemRow(OrderItem);

impl<'r> FromRow<'r, SqliteRow> for ItemRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let order_id: uuid::Uuid = row.try_get("order_id")?;
        let tyre_id: uuid::Uuid = row.try_get("tyre_id")?;

        Ok(Self(OrderItem {
            id: OrderItemId::from_uuid(id),
            order_id: OrderId::from_uuid(order_id),
            tyre_id: TyreId::from_uuid(tyre_id),
            quantity: row.try_get("quantity")?,
            unit_price_cents: row.try_get("unit_price_cents")?,
        }))
    }
}

const INSERT_ORDER: &str = r"
    INSERT INTO orders (id, user_id, dealer_id, status, total_cents, created_at)
    VALUES (?, ?, ?, ?, ?, ?)
";
const INSERT_ITEM: &str = r"
    INSERT INTO order_items (id, order_id, tyre_id, quantity, unit_price_cents)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_RECENT: &str = "SELECT * FROM orders ORDER BY created_at DESC LIMIT ?";
const SELECT_BY_USER: &str = "SELECT * FROM orders WHERE user_id = ? ORDER BY created_at DESC";
const SELECT_BY_DEALER: &str =
    "SELECT * FROM orders WHERE dealer_id = ? ORDER BY created_at DESC";
const SELECT_ITEMS_OF: &str = "SELECT * FROM order_items WHERE order_id IN (";

/// Order ids bound per item query, well under `SQLite`'s parameter limit.
const ITEM_BATCH: usize = 500;
const COUNT_DISTINCT_CUSTOMERS: &str =
    "SELECT COUNT(DISTINCT user_id) FROM orders WHERE dealer_id = ?";

/// `WHERE` clause selecting the orders in `scope`, and the id to bind to it.
fn scope_filter(scope: OrderScope) -> (&'static str, Option<uuid::Uuid>) {
    match scope {
        OrderScope::All => ("1 = 1", None),
        OrderScope::Buyer(user_id) => ("user_id = ?", Some(user_id.as_uuid())),
        OrderScope::Seller(dealer_id) => ("dealer_id = ?", Some(dealer_id.as_uuid())),
    }
}

fn attach_items(orders: Vec<OrderRow>, items: Vec<ItemRow>) -> Vec<Order> {
    let mut by_order: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
    for ItemRow(item) in items {
        by_order.entry(item.order_id).or_default().push(item);
    }
    orders
        .into_iter()
        .map(|OrderRow(mut order)| {
            order.items = by_order.remove(&order.id).unwrap_or_default();
            order
        })
        .collect()
}

/// `SQLite`-backed order repository.
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run an order query bound to `key`, then load the items of the rows it returned.
    async fn fetch_with_items<K>(
        pool: &SqlitePool,
        orders_sql: &'static str,
        key: K,
    ) -> Result<Vec<Order>, StorageError>
    where
        K: for<'q> sqlx::Encode<'q, Sqlite> + sqlx::Type<Sqlite> + Send + 'static,
    {
        let orders: Vec<OrderRow> = sqlx::query_as(orders_sql).bind(key).fetch_all(pool).await?;
        Self::load_items(pool, orders).await
    }

    /// Fetch the items of exactly `orders` by id. Orders committed after the
    /// order query ran cannot change which items come back.
    async fn load_items(
        pool: &SqlitePool,
        orders: Vec<OrderRow>,
    ) -> Result<Vec<Order>, StorageError> {
        let mut items: Vec<ItemRow> = Vec::new();
        for batch in orders.chunks(ITEM_BATCH) {
            let mut query = QueryBuilder::<Sqlite>::new(SELECT_ITEMS_OF);
            let mut ids = query.separated(", ");
            for OrderRow(order) in batch {
                ids.push_bind(order.id.as_uuid());
            }
            ids.push_unseparated(")");
            items.extend(query.build_query_as::<ItemRow>().fetch_all(pool).await?);
        }
        Ok(attach_items(orders, items))
    }
}

impl OrderRepository for SqliteOrderRepository {
    fn create(&self, order: Order) -> impl Future<Output = Result<Order, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            sqlx::query(INSERT_ORDER)
                .bind(order.id.as_uuid())
                .bind(order.user_id.as_uuid())
                .bind(order.dealer_id.map(DealerId::as_uuid))
                .bind(order.status.as_str())
                .bind(order.total_cents)
                .bind(encode_time(order.created_at))
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            for item in &order.items {
                sqlx::query(INSERT_ITEM)
                    .bind(item.id.as_uuid())
                    .bind(item.order_id.as_uuid())
                    .bind(item.tyre_id.as_uuid())
                    .bind(item.quantity)
                    .bind(item.unit_price_cents)
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            }

            tx.commit().await.map_err(StorageError::from)?;
            Ok(order)
        }
    }

    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Order>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        async move {
            Ok(Self::fetch_with_items(&pool, SELECT_RECENT, limit).await?)
        }
    }

    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Order>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            Ok(Self::fetch_with_items(&pool, SELECT_BY_USER, user_id.as_uuid()).await?)
        }
    }

    fn find_by_dealer(
        &self,
        dealer_id: DealerId,
    ) -> impl Future<Output = Result<Vec<Order>, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            Ok(Self::fetch_with_items(&pool, SELECT_BY_DEALER, dealer_id.as_uuid()).await?)
        }
    }

    fn count(
        &self,
        scope: OrderScope,
        status: Option<OrderStatus>,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let pool = self.pool.clone();
        let (filter, key) = scope_filter(scope);
        let sql = match status {
            Some(_) => format!("SELECT COUNT(*) FROM orders WHERE {filter} AND status = ?"),
            None => format!("SELECT COUNT(*) FROM orders WHERE {filter}"),
        };
        async move {
            let mut query = sqlx::query_scalar::<_, i64>(&sql);
            if let Some(key) = key {
                query = query.bind(key);
            }
            if let Some(status) = status {
                query = query.bind(status.as_str());
            }
            let count = query.fetch_one(&pool).await.map_err(StorageError::from)?;
            Ok(count)
        }
    }

    fn total_amount(
        &self,
        scope: OrderScope,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let pool = self.pool.clone();
        let (filter, key) = scope_filter(scope);
        let sql = format!(
            "SELECT COALESCE(SUM(total_cents), 0) FROM orders WHERE {filter} AND status != '{}'",
            OrderStatus::Cancelled.as_str()
        );
        async move {
            let mut query = sqlx::query_scalar::<_, i64>(&sql);
            if let Some(key) = key {
                query = query.bind(key);
            }
            let total = query.fetch_one(&pool).await.map_err(StorageError::from)?;
            Ok(total)
        }
    }

    fn count_distinct_customers(
        &self,
        dealer_id: DealerId,
    ) -> impl Future<Output = Result<i64, TyreHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let count: i64 = sqlx::query_scalar(COUNT_DISTINCT_CUSTOMERS)
                .bind(dealer_id.as_uuid())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;
            Ok(count)
        }
    }
}
