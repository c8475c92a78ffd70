//! Primitive operations on the `shopify_products` table.
//!
//! Each function is generic over the executor so it can run against the pool
//! directly or inside the batch transaction held by [`crate::sync`].

use shopsync_core::ProductRecord;
use sqlx::sqlite::Sqlite;

use crate::DbError;

/// Returns the maximum product id, or `None` when the table is empty.
///
/// This is the incremental-sync bound: only records with a greater id are
/// inserted by the next run.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn max_product_id<'e, E>(executor: E) -> Result<Option<i64>, DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let max = sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(id) FROM shopify_products")
        .fetch_one(executor)
        .await?;
    Ok(max)
}

/// Returns `true` if a product row with this id already exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn product_exists<'e, E>(executor: E, id: i64) -> Result<bool, DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let found =
        sqlx::query_scalar::<_, i64>("SELECT EXISTS(SELECT 1 FROM shopify_products WHERE id = ?1)")
            .bind(id)
            .fetch_one(executor)
            .await?;
    Ok(found != 0)
}

/// Inserts one flattened product row. Never updates in place: the id is the
/// primary key and a duplicate insert is a constraint error.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including uniqueness
/// violations).
pub async fn insert_product<'e, E>(executor: E, record: &ProductRecord) -> Result<(), DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO shopify_products (id, title, price, colors, sizes, image_paths) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(record.id)
    .bind(&record.title)
    .bind(record.price)
    .bind(&record.colors)
    .bind(&record.sizes)
    .bind(&record.image_paths)
    .execute(executor)
    .await?;
    Ok(())
}

/// Total number of product rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_products<'e, E>(executor: E) -> Result<i64, DbError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shopify_products")
        .fetch_one(executor)
        .await?;
    Ok(count)
}
