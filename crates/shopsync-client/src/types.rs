//! Shopify Admin REST API response types.
//!
//! Only the fields this pipeline consumes are modeled; everything else in
//! the Admin payloads is ignored by serde. Numeric IDs are `i64` — Shopify
//! product/order IDs exceed `i32` range on any store created after 2015.
//!
//! `options[].position` is 1-based and capped at 3 by Shopify; the value at
//! position N resolves through `variants[].option{N}`. `values` on an option
//! lists the distinct choices but is absent from some older API versions, so
//! projection derives values from the variants instead.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Envelope for `GET .../products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    pub products: Vec<Product>,
}

/// Envelope for `GET .../orders.json`.
#[derive(Debug, Deserialize)]
pub struct OrdersEnvelope {
    pub orders: Vec<Order>,
}

/// Envelope for the `count.json` endpoints.
#[derive(Debug, Deserialize)]
pub struct CountEnvelope {
    pub count: u64,
}

/// A single product from the Admin API.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Shopify numeric product ID.
    pub id: i64,
    pub title: String,
    /// Named options (Color, Size, ...) with their 1-based positions.
    #[serde(default)]
    pub options: Vec<ProductOption>,
    /// Purchasable variants; the first one carries the display price.
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// A named product option, e.g. `{name: "Color", position: 1}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductOption {
    pub name: String,
    /// 1-based; selects `option1`/`option2`/`option3` on each variant.
    /// Always present in observed responses but modeled as optional for safety.
    #[serde(default)]
    pub position: Option<i32>,
    /// Distinct values for this option. May be absent on older API versions.
    #[serde(default)]
    pub values: Vec<String>,
}

/// A single purchasable variant of a [`Product`].
#[derive(Debug, Clone, Deserialize)]
pub struct Variant {
    /// Shopify numeric variant ID.
    pub id: i64,
    /// Current price as a decimal string (e.g., `"30.00"`). Never null.
    pub price: String,
    /// Resolved value of the position-1 option (e.g. `"Red"`).
    #[serde(default)]
    pub option1: Option<String>,
    /// Resolved value of the position-2 option.
    #[serde(default)]
    pub option2: Option<String>,
    /// Resolved value of the position-3 option.
    #[serde(default)]
    pub option3: Option<String>,
}

impl Variant {
    /// Returns the resolved option value at the given 1-based position.
    #[must_use]
    pub fn option_at(&self, position: i32) -> Option<&str> {
        match position {
            1 => self.option1.as_deref(),
            2 => self.option2.as_deref(),
            3 => self.option3.as_deref(),
            _ => None,
        }
    }
}

/// A product image; only the CDN URL is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub id: Option<i64>,
    pub src: String,
}

/// A single order from the Admin API.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    /// Shopify numeric order ID.
    pub id: i64,
    /// Customer email; null for some POS / guest checkouts.
    #[serde(default)]
    pub email: Option<String>,
    /// Order creation time, RFC 3339 with the shop's UTC offset.
    pub created_at: DateTime<Utc>,
    /// Order total as a decimal string.
    pub total_price: String,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// One purchased item on an [`Order`].
#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    /// Display name, including the variant title (e.g. `"Hoodie - Red / M"`).
    pub name: String,
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_deserializes_with_unknown_fields_ignored() {
        let json = r#"{
            "id": 632910392,
            "title": "IPod Nano - 8GB",
            "body_html": "<p>ignored</p>",
            "vendor": "Apple",
            "options": [{"id": 594680422, "name": "Color", "position": 1, "values": ["Pink"]}],
            "variants": [{"id": 808950810, "price": "199.00", "option1": "Pink", "grams": 200}],
            "images": [{"id": 850703190, "src": "https://cdn.shopify.com/ipod-nano.png"}]
        }"#;
        let product: Product = serde_json::from_str(json).expect("valid product JSON");
        assert_eq!(product.id, 632_910_392);
        assert_eq!(product.options[0].position, Some(1));
        assert_eq!(product.variants[0].option_at(1), Some("Pink"));
        assert_eq!(product.images[0].src, "https://cdn.shopify.com/ipod-nano.png");
    }

    #[test]
    fn variant_option_at_out_of_range_is_none() {
        let variant = Variant {
            id: 1,
            price: "10.00".to_string(),
            option1: Some("Red".to_string()),
            option2: None,
            option3: None,
        };
        assert_eq!(variant.option_at(0), None);
        assert_eq!(variant.option_at(4), None);
    }

    #[test]
    fn order_deserializes_created_at_with_offset() {
        let json = r#"{
            "id": 450789469,
            "email": "bob.norman@example.com",
            "created_at": "2024-04-09T11:50:29-04:00",
            "total_price": "409.94",
            "line_items": [{"name": "IPod Nano - 8GB - Pink", "quantity": 1, "sku": "IPOD2008PINK"}]
        }"#;
        let order: Order = serde_json::from_str(json).expect("valid order JSON");
        assert_eq!(order.id, 450_789_469);
        assert_eq!(order.created_at.to_rfc3339(), "2024-04-09T15:50:29+00:00");
        assert_eq!(order.line_items[0].quantity, 1);
    }

    #[test]
    fn order_email_defaults_to_none_when_absent() {
        let json = r#"{
            "id": 1,
            "created_at": "2024-04-09T11:50:29Z",
            "total_price": "0.00"
        }"#;
        let order: Order = serde_json::from_str(json).expect("valid order JSON");
        assert!(order.email.is_none());
        assert!(order.line_items.is_empty());
    }
}
