//! Lazy `since_id` pagination over a catalog resource.
//!
//! [`Pager`] replaces a materialized "fetch everything" call with a finite,
//! consume-once sequence of pages. Failure semantics follow the sync design:
//! a page that still fails after the retry budget is logged and ends the
//! sequence early instead of surfacing an error — the run is simply
//! incomplete, and the next scheduled run resumes from the table's maximum
//! identifier.

use futures::stream::{self, Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::client::ShopifyClient;
use crate::types::{Order, OrdersEnvelope, Product, ProductsEnvelope};

/// A catalog resource that can be counted and paged by `since_id`.
pub trait CatalogRecord: DeserializeOwned + Send {
    /// Envelope key and log label, e.g. `"products"`.
    const KIND: &'static str;
    /// List endpoint path, e.g. `"products.json"`.
    const LIST_PATH: &'static str;
    /// Count endpoint path, e.g. `"products/count.json"`.
    const COUNT_PATH: &'static str;

    /// The record's upstream identifier, used to advance the cursor.
    fn id(&self) -> i64;

    /// Parses a list-endpoint body into records.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error when the body does not match the
    /// resource's envelope shape.
    fn parse_page(body: &str) -> Result<Vec<Self>, serde_json::Error>;
}

impl CatalogRecord for Product {
    const KIND: &'static str = "products";
    const LIST_PATH: &'static str = "products.json";
    const COUNT_PATH: &'static str = "products/count.json";

    fn id(&self) -> i64 {
        self.id
    }

    fn parse_page(body: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str::<ProductsEnvelope>(body).map(|e| e.products)
    }
}

impl CatalogRecord for Order {
    const KIND: &'static str = "orders";
    const LIST_PATH: &'static str = "orders.json";
    const COUNT_PATH: &'static str = "orders/count.json";

    fn id(&self) -> i64 {
        self.id
    }

    fn parse_page(body: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str::<OrdersEnvelope>(body).map(|e| e.orders)
    }
}

/// Pages through one resource of one store, yielding each page once.
///
/// The first call to [`Pager::next_page`] queries the resource's count
/// endpoint to compute an advisory page bound (`ceil(total / page_size)`).
/// The bound guards against a cursor that stops advancing; the loop also
/// terminates as soon as a page comes back short or empty.
pub struct Pager<'c, T> {
    client: &'c ShopifyClient,
    base_url: String,
    page_size: u32,
    since_id: i64,
    /// Advisory pages remaining; `None` until the count query has run.
    pages_left: Option<u64>,
    done: bool,
    _record: PhantomData<T>,
}

pub type ProductPager<'c> = Pager<'c, Product>;
pub type OrderPager<'c> = Pager<'c, Order>;

impl<'c, T: CatalogRecord> Pager<'c, T> {
    #[must_use]
    pub fn new(client: &'c ShopifyClient, base_url: impl Into<String>, page_size: u32) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            page_size: page_size.max(1),
            since_id: 0,
            pages_left: None,
            done: false,
            _record: PhantomData,
        }
    }

    /// Fetches the next page, or `None` when the sequence has ended.
    ///
    /// Retry exhaustion (on the count query or any page) logs an error and
    /// returns `None`; it never panics or returns an error value.
    pub async fn next_page(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        if self.pages_left.is_none() {
            match self.client.count::<T>(&self.base_url).await {
                Ok(total) => {
                    let pages = total.div_ceil(u64::from(self.page_size));
                    if pages == 0 {
                        self.done = true;
                        return None;
                    }
                    self.pages_left = Some(pages);
                }
                Err(e) => {
                    tracing::error!(
                        kind = T::KIND,
                        error = %e,
                        "failed to fetch record count after retries; skipping sync run"
                    );
                    self.done = true;
                    return None;
                }
            }
        }

        match self
            .client
            .fetch_page::<T>(&self.base_url, self.since_id, self.page_size)
            .await
        {
            Ok(page) => {
                if page.is_empty() {
                    self.done = true;
                    return None;
                }
                if page.len() < self.page_size as usize {
                    // Short page: this is the last one.
                    self.done = true;
                } else {
                    self.since_id = page.last().map_or(self.since_id, CatalogRecord::id);
                    let remaining = self.pages_left.unwrap_or(0).saturating_sub(1);
                    self.pages_left = Some(remaining);
                    if remaining == 0 {
                        self.done = true;
                    }
                }
                Some(page)
            }
            Err(e) => {
                tracing::error!(
                    kind = T::KIND,
                    since_id = self.since_id,
                    error = %e,
                    "failed to fetch page after retries; ending sync run early"
                );
                self.done = true;
                None
            }
        }
    }

    /// Flattens the page sequence into a stream of individual records.
    ///
    /// The stream is finite and can be consumed exactly once; pages are
    /// fetched on demand as the consumer advances.
    pub fn into_stream(self) -> impl Stream<Item = T> + 'c
    where
        T: 'c,
    {
        stream::unfold(self, |mut pager| async move {
            pager
                .next_page()
                .await
                .map(|page| (stream::iter(page), pager))
        })
        .flatten()
    }
}
