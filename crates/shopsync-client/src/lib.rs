pub mod client;
pub mod error;
pub mod pager;
pub mod project;
pub mod retry;
pub mod types;

pub use client::ShopifyClient;
pub use error::ClientError;
pub use pager::{CatalogRecord, OrderPager, Pager, ProductPager};
pub use project::{project_order, project_product};
pub use types::{LineItem, Order, Product, ProductImage, ProductOption, Variant};
