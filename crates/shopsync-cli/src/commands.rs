//! Sync command handlers.
//!
//! Each sync pages the Admin API lazily, projects raw records to their flat
//! row shape (projection failures are logged and skipped), and hands the
//! surviving stream to the incremental upserter. A truncated fetch is not an
//! error: the run simply syncs less, and the next run resumes from the
//! table's maximum id.

use futures::StreamExt;
use sqlx::SqlitePool;

use shopsync_client::pager::Pager;
use shopsync_client::types::{Order, Product};
use shopsync_client::{project_order, project_product, ShopifyClient};
use shopsync_core::AppConfig;
use shopsync_db::SyncOutcome;

/// Records requested per page. The Admin API caps `limit` at 250.
const PAGE_SIZE: u32 = 250;

fn build_client(config: &AppConfig) -> Result<ShopifyClient, shopsync_client::ClientError> {
    ShopifyClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        &config.access_token,
        config.fetch_max_attempts,
        config.retry_delay_secs,
    )
}

/// Sync the product catalog into `shopify_products`.
pub async fn sync_products(pool: &SqlitePool, config: &AppConfig) -> anyhow::Result<SyncOutcome> {
    let client = build_client(config)?;
    let base_url = config.admin_base_url();
    tracing::info!(store = %config.store_handle, "starting product sync");

    let records = Pager::<Product>::new(&client, base_url, PAGE_SIZE)
        .into_stream()
        .filter_map(|raw| async move {
            match project_product(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping product — projection failed");
                    None
                }
            }
        });

    let outcome = shopsync_db::store_new_products(pool, records).await?;
    tracing::info!(
        inserted = outcome.inserted,
        skipped = outcome.skipped,
        failed = outcome.failed,
        "product sync complete"
    );
    Ok(outcome)
}

/// Sync the order history into `shopify_orders`.
pub async fn sync_orders(pool: &SqlitePool, config: &AppConfig) -> anyhow::Result<SyncOutcome> {
    let client = build_client(config)?;
    let base_url = config.admin_base_url();
    tracing::info!(store = %config.store_handle, "starting order sync");

    let records = Pager::<Order>::new(&client, base_url, PAGE_SIZE)
        .into_stream()
        .filter_map(|raw| async move {
            match project_order(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping order — projection failed");
                    None
                }
            }
        });

    let outcome = shopsync_db::store_new_orders(pool, records).await?;
    tracing::info!(
        inserted = outcome.inserted,
        skipped = outcome.skipped,
        failed = outcome.failed,
        "order sync complete"
    );
    Ok(outcome)
}

/// Print row counts and maximum ids for both tables.
pub async fn status(pool: &SqlitePool) -> anyhow::Result<()> {
    let product_count = shopsync_db::count_products(pool).await?;
    let product_max = shopsync_db::max_product_id(pool).await?;
    let order_count = shopsync_db::count_orders(pool).await?;
    let order_max = shopsync_db::max_order_id(pool).await?;

    println!(
        "shopify_products: {product_count} rows (max id: {})",
        format_max(product_max)
    );
    println!(
        "shopify_orders:   {order_count} rows (max id: {})",
        format_max(order_max)
    );
    Ok(())
}

fn format_max(max: Option<i64>) -> String {
    max.map_or_else(|| "-".to_string(), |id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_max_renders_dash_for_empty_table() {
        assert_eq!(format_max(None), "-");
        assert_eq!(format_max(Some(42)), "42");
    }
}
