//! Primitive operations on the `shopify_orders` table.
//!
//! Mirrors [`crate::products`]; `created_at` binds through sqlx's chrono
//! support and is stored as RFC 3339 text.

use shopsync_core::OrderRecord;
use sqlx::sqlite::Sqlite;

use crate::DbError;

/// Returns the maximum order id, or `None` when the table is empty.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn max_order_id<'e, E>(executor: E) -> Result<Option<i64>, DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let max = sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(id) FROM shopify_orders")
        .fetch_one(executor)
        .await?;
    Ok(max)
}

/// Returns `true` if an order row with this id already exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn order_exists<'e, E>(executor: E, id: i64) -> Result<bool, DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let found =
        sqlx::query_scalar::<_, i64>("SELECT EXISTS(SELECT 1 FROM shopify_orders WHERE id = ?1)")
            .bind(id)
            .fetch_one(executor)
            .await?;
    Ok(found != 0)
}

/// Inserts one flattened order row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including uniqueness
/// violations).
pub async fn insert_order<'e, E>(executor: E, record: &OrderRecord) -> Result<(), DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO shopify_orders (id, email, created_at, total_price, line_items) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(record.id)
    .bind(&record.email)
    .bind(record.created_at)
    .bind(record.total_price)
    .bind(&record.line_items)
    .execute(executor)
    .await?;
    Ok(())
}

/// Total number of order rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_orders<'e, E>(executor: E) -> Result<i64, DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shopify_orders")
        .fetch_one(executor)
        .await?;
    Ok(count)
}
