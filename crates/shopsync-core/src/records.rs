//! Flattened record shapes shared between the fetch and storage layers.
//!
//! Multi-valued fields are stored as delimited strings so each record maps
//! to exactly one relational row: colors, sizes, and image paths are
//! comma-joined; order line items are pipe-joined because item names may
//! themselves contain commas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delimiter for comma-joined multi-valued product fields.
pub const LIST_DELIMITER: &str = ",";

/// Delimiter for order line items (`"{name} x {qty}"` segments).
pub const LINE_ITEM_DELIMITER: &str = " | ";

/// One Shopify product, flattened to a single relational row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Shopify numeric product ID; the table's primary key.
    pub id: i64,
    pub title: String,
    /// Price of the first variant, as Shopify reports it.
    pub price: f64,
    /// Comma-joined color values, e.g. `"Red,Blue"`. Empty when the product
    /// has no Color option.
    pub colors: String,
    /// Comma-joined size values, e.g. `"S,M,L"`. Empty when the product has
    /// no Size option.
    pub sizes: String,
    /// Comma-joined CDN image URLs.
    pub image_paths: String,
}

impl ProductRecord {
    /// Splits the joined `colors` field back into individual values.
    #[must_use]
    pub fn color_list(&self) -> Vec<&str> {
        split_joined(&self.colors)
    }

    /// Splits the joined `sizes` field back into individual values.
    #[must_use]
    pub fn size_list(&self) -> Vec<&str> {
        split_joined(&self.sizes)
    }

    /// Returns `true` if at least one image URL was captured.
    #[must_use]
    pub fn has_images(&self) -> bool {
        !self.image_paths.is_empty()
    }
}

/// One Shopify order, flattened to a single relational row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Shopify numeric order ID; the table's primary key.
    pub id: i64,
    /// Customer email. Absent for some POS / guest checkouts.
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub total_price: f64,
    /// Pipe-joined line items, e.g. `"Hoodie x 2 | Sticker x 1"`.
    pub line_items: String,
}

impl OrderRecord {
    /// Number of line items encoded in the joined `line_items` field.
    #[must_use]
    pub fn line_item_count(&self) -> usize {
        if self.line_items.is_empty() {
            0
        } else {
            self.line_items.split(LINE_ITEM_DELIMITER).count()
        }
    }
}

fn split_joined(joined: &str) -> Vec<&str> {
    if joined.is_empty() {
        Vec::new()
    } else {
        joined.split(LIST_DELIMITER).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(colors: &str, sizes: &str, image_paths: &str) -> ProductRecord {
        ProductRecord {
            id: 123_456_789,
            title: "Linen Shirt".to_string(),
            price: 39.99,
            colors: colors.to_string(),
            sizes: sizes.to_string(),
            image_paths: image_paths.to_string(),
        }
    }

    #[test]
    fn color_list_empty_when_no_colors() {
        let product = make_product("", "S,M", "");
        assert!(product.color_list().is_empty());
    }

    #[test]
    fn color_list_splits_on_commas() {
        let product = make_product("Red,Blue", "", "");
        assert_eq!(product.color_list(), vec!["Red", "Blue"]);
    }

    #[test]
    fn size_list_single_value() {
        let product = make_product("", "One Size", "");
        assert_eq!(product.size_list(), vec!["One Size"]);
    }

    #[test]
    fn has_images_false_when_empty() {
        let product = make_product("", "", "");
        assert!(!product.has_images());
    }

    #[test]
    fn has_images_true_when_paths_present() {
        let product = make_product("", "", "https://cdn.example.com/a.jpg");
        assert!(product.has_images());
    }

    #[test]
    fn line_item_count_zero_for_empty_order() {
        let order = OrderRecord {
            id: 1,
            email: None,
            created_at: Utc::now(),
            total_price: 0.0,
            line_items: String::new(),
        };
        assert_eq!(order.line_item_count(), 0);
    }

    #[test]
    fn line_item_count_counts_pipe_joined_segments() {
        let order = OrderRecord {
            id: 2,
            email: Some("buyer@example.com".to_string()),
            created_at: Utc::now(),
            total_price: 54.50,
            line_items: "Hoodie x 2 | Sticker x 1".to_string(),
        };
        assert_eq!(order.line_item_count(), 2);
    }

    #[test]
    fn serde_roundtrip_product() {
        let product = make_product("Red", "M", "https://cdn.example.com/a.jpg");
        let json = serde_json::to_string(&product).expect("serialization failed");
        let decoded: ProductRecord = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded.id, product.id);
        assert_eq!(decoded.title, product.title);
        assert_eq!(decoded.colors, "Red");
    }
}
