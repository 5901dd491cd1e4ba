use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

use super::repo_types::{Order, OrderLineItem, OrderStatus};
use super::token;

const ORDER_COLUMNS: &str =
    "id, items, total_amount, customer_name, customer_phone, status, token_number, created_at";

/// Filters for the listing contract. `since` is an instant (local midnight for
/// `date=today`); `limit` is already clamped by the handler.
#[derive(Debug, Default)]
pub struct OrderListFilter {
    pub status: Option<StatusFilter>,
    pub since: Option<OffsetDateTime>,
    pub limit: i64,
}

#[derive(Debug)]
pub enum StatusFilter {
    /// pending ∪ cooking ∪ ready
    Active,
    Exact(OrderStatus),
}

impl Order {
    /// Inserts the order and its daily token in one transaction. The token
    /// comes from the per-day counter row; if anything fails no order is left
    /// behind without a token.
    pub async fn create(
        db: &PgPool,
        tz: UtcOffset,
        items: Vec<OrderLineItem>,
        total_amount: Decimal,
        customer_name: Option<String>,
        customer_phone: Option<String>,
    ) -> anyhow::Result<Order> {
        let now = OffsetDateTime::now_utc();
        let mut tx = db.begin().await?;

        let token_number = token::allocate(&mut tx, token::local_day(now, tz)).await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (items, total_amount, customer_name, customer_phone, status, token_number, created_at)
            VALUES ($1, $2, $3, $4, 'pending', $5, $6)
            RETURNING {ORDER_COLUMNS}
            "#,
        ))
        .bind(Json(items))
        .bind(total_amount)
        .bind(customer_name)
        .bind(customer_phone)
        .bind(token_number)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(order)
    }

    pub async fn get(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(order)
    }

    pub async fn list(db: &PgPool, filter: OrderListFilter) -> anyhow::Result<Vec<Order>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ORDER_COLUMNS} FROM orders"));

        let mut prefix = " WHERE ";
        match &filter.status {
            Some(StatusFilter::Active) => {
                qb.push(prefix).push("status = ANY(");
                qb.push_bind(OrderStatus::ACTIVE.to_vec());
                qb.push(")");
                prefix = " AND ";
            }
            Some(StatusFilter::Exact(status)) => {
                qb.push(prefix).push("status = ");
                qb.push_bind(*status);
                prefix = " AND ";
            }
            None => {}
        }
        if let Some(since) = filter.since {
            qb.push(prefix).push("created_at >= ");
            qb.push_bind(since);
        }

        qb.push(" ORDER BY created_at DESC LIMIT ");
        qb.push_bind(filter.limit);

        let orders = qb.build_query_as::<Order>().fetch_all(db).await?;
        Ok(orders)
    }

    pub async fn set_status(
        db: &PgPool,
        id: Uuid,
        status: OrderStatus,
    ) -> anyhow::Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}",
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(db)
        .await?;
        Ok(order)
    }

    /// Loyalty lookup: lifetime order count for a phone number, as entered.
    pub async fn count_by_phone(db: &PgPool, phone: &str) -> anyhow::Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE customer_phone = $1")
                .bind(phone)
                .fetch_one(db)
                .await?;
        Ok(count)
    }
}
