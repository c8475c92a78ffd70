//! Incremental upsert of fetched record streams.
//!
//! Only records with an id strictly greater than the table's current maximum
//! are considered; the table is append-only from this subsystem's point of
//! view. Each batch runs in a single transaction. A per-row failure is
//! logged and skipped so one bad row never blocks the rest; transaction-level
//! failures (connection loss, commit failure) propagate and abort the batch.
//!
//! Single-writer assumption: one sync run writes at a time. Overlapping runs
//! are tolerated only through the defensive exists-check before each insert.

use futures::{pin_mut, Stream, StreamExt};
use shopsync_core::{OrderRecord, ProductRecord};
use sqlx::SqlitePool;

use crate::{orders, products, DbError};

/// Tally of one incremental sync batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Rows newly inserted.
    pub inserted: u64,
    /// Rows skipped because the id was already present at insert time.
    pub skipped: u64,
    /// Rows that failed to insert and were dropped from the batch.
    pub failed: u64,
}

/// Inserts products from `records` whose id exceeds the table's current
/// maximum (all of them when the table is empty).
///
/// The stream is consumed lazily; records at or below the bound are dropped
/// without a database round-trip. Everything else happens inside one
/// transaction: a defensive exists-check immediately before each insert
/// (overlapping runs, duplicate ids within the stream), then the insert
/// itself, whose failure is logged and counted rather than propagated.
///
/// # Errors
///
/// Returns [`DbError`] on transaction-level failures: computing the bound,
/// opening the transaction, running the exists-check, or committing.
pub async fn store_new_products<S>(pool: &SqlitePool, records: S) -> Result<SyncOutcome, DbError>
where
    S: Stream<Item = ProductRecord>,
{
    let bound = products::max_product_id(pool).await?;
    let mut outcome = SyncOutcome::default();

    let mut tx = pool.begin().await?;
    pin_mut!(records);

    while let Some(record) = records.next().await {
        if bound.is_some_and(|b| record.id <= b) {
            continue;
        }
        if products::product_exists(&mut *tx, record.id).await? {
            tracing::info!(id = record.id, "skipping product — already present");
            outcome.skipped += 1;
            continue;
        }
        match products::insert_product(&mut *tx, &record).await {
            Ok(()) => outcome.inserted += 1,
            Err(e) => {
                tracing::warn!(
                    id = record.id,
                    error = %e,
                    "failed to insert product; continuing batch"
                );
                outcome.failed += 1;
            }
        }
    }

    tx.commit().await?;
    Ok(outcome)
}

/// Inserts orders from `records` whose id exceeds the table's current
/// maximum. Semantics match [`store_new_products`].
///
/// # Errors
///
/// Returns [`DbError`] on transaction-level failures.
pub async fn store_new_orders<S>(pool: &SqlitePool, records: S) -> Result<SyncOutcome, DbError>
where
    S: Stream<Item = OrderRecord>,
{
    let bound = orders::max_order_id(pool).await?;
    let mut outcome = SyncOutcome::default();

    let mut tx = pool.begin().await?;
    pin_mut!(records);

    while let Some(record) = records.next().await {
        if bound.is_some_and(|b| record.id <= b) {
            continue;
        }
        if orders::order_exists(&mut *tx, record.id).await? {
            tracing::info!(id = record.id, "skipping order — already present");
            outcome.skipped += 1;
            continue;
        }
        match orders::insert_order(&mut *tx, &record).await {
            Ok(()) => outcome.inserted += 1,
            Err(e) => {
                tracing::warn!(
                    id = record.id,
                    error = %e,
                    "failed to insert order; continuing batch"
                );
                outcome.failed += 1;
            }
        }
    }

    tx.commit().await?;
    Ok(outcome)
}
