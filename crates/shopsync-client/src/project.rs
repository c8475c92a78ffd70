//! Projection from raw Admin API shapes to the flattened records the
//! database stores.
//!
//! A product's colors and sizes are not stored directly by Shopify: the
//! product declares a named option with a 1-based position, and each variant
//! resolves that position through its `option1`/`option2`/`option3` fields.
//! Projection walks the variants in order and de-duplicates the resolved
//! values before joining them.

use shopsync_core::records::{LINE_ITEM_DELIMITER, LIST_DELIMITER};
use shopsync_core::{OrderRecord, ProductRecord};

use crate::error::ClientError;
use crate::types::{Order, Product};

/// Projects a raw [`Product`] into a flat [`ProductRecord`].
///
/// The price comes from the first variant, matching the storefront display
/// price.
///
/// # Errors
///
/// Returns [`ClientError::Projection`] if the product has no variants or the
/// first variant's price is not a decimal number.
pub fn project_product(product: Product) -> Result<ProductRecord, ClientError> {
    let first_variant = product
        .variants
        .first()
        .ok_or_else(|| ClientError::Projection {
            record_id: product.id,
            reason: "product has no variants".into(),
        })?;

    let price = first_variant
        .price
        .parse::<f64>()
        .map_err(|e| ClientError::Projection {
            record_id: product.id,
            reason: format!("unparseable price \"{}\": {e}", first_variant.price),
        })?;

    let colors = option_values(&product, "Color");
    let sizes = option_values(&product, "Size");
    let image_paths = product
        .images
        .iter()
        .map(|image| image.src.as_str())
        .collect::<Vec<_>>()
        .join(LIST_DELIMITER);

    Ok(ProductRecord {
        id: product.id,
        title: product.title,
        price,
        colors,
        sizes,
        image_paths,
    })
}

/// Projects a raw [`Order`] into a flat [`OrderRecord`].
///
/// # Errors
///
/// Returns [`ClientError::Projection`] if `total_price` is not a decimal
/// number.
pub fn project_order(order: Order) -> Result<OrderRecord, ClientError> {
    let total_price = order
        .total_price
        .parse::<f64>()
        .map_err(|e| ClientError::Projection {
            record_id: order.id,
            reason: format!("unparseable total_price \"{}\": {e}", order.total_price),
        })?;

    let line_items = order
        .line_items
        .iter()
        .map(|item| format!("{} x {}", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join(LINE_ITEM_DELIMITER);

    Ok(OrderRecord {
        id: order.id,
        email: order.email,
        created_at: order.created_at,
        total_price,
        line_items,
    })
}

/// Resolves the joined values of the option named `option_name`
/// (case-insensitive).
///
/// The option's position selects `option{N}` on each variant; values are
/// de-duplicated preserving variant order. When no variant resolves a value
/// (e.g. a product with declared options but a single default variant), the
/// option's own `values` list is used as a fallback.
fn option_values(product: &Product, option_name: &str) -> String {
    let Some((index, option)) = product
        .options
        .iter()
        .enumerate()
        .find(|(_, o)| o.name.eq_ignore_ascii_case(option_name))
    else {
        return String::new();
    };

    // Position is 1-based; when absent, assume declaration order.
    let position = option
        .position
        .unwrap_or_else(|| i32::try_from(index).unwrap_or(0) + 1);

    let mut values: Vec<&str> = Vec::new();
    for variant in &product.variants {
        if let Some(value) = variant.option_at(position) {
            if !value.is_empty() && !values.contains(&value) {
                values.push(value);
            }
        }
    }

    if values.is_empty() {
        for value in &option.values {
            if !value.is_empty() && !values.contains(&value.as_str()) {
                values.push(value);
            }
        }
    }

    values.join(LIST_DELIMITER)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::{LineItem, ProductImage, ProductOption, Variant};

    fn variant(id: i64, price: &str, options: [Option<&str>; 3]) -> Variant {
        Variant {
            id,
            price: price.to_string(),
            option1: options[0].map(str::to_string),
            option2: options[1].map(str::to_string),
            option3: options[2].map(str::to_string),
        }
    }

    fn option(name: &str, position: i32, values: &[&str]) -> ProductOption {
        ProductOption {
            name: name.to_string(),
            position: Some(position),
            values: values.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    #[test]
    fn color_option_at_position_one_resolves_through_option1() {
        let product = Product {
            id: 1,
            title: "Tee".to_string(),
            options: vec![option("Color", 1, &[])],
            variants: vec![variant(10, "19.99", [Some("Red"), None, None])],
            images: vec![],
        };
        let record = project_product(product).expect("projection should succeed");
        assert_eq!(record.colors, "Red");
        assert_eq!(record.sizes, "");
    }

    #[test]
    fn values_are_deduplicated_preserving_variant_order() {
        let product = Product {
            id: 2,
            title: "Tee".to_string(),
            options: vec![option("Color", 1, &[]), option("Size", 2, &[])],
            variants: vec![
                variant(10, "19.99", [Some("Red"), Some("S"), None]),
                variant(11, "19.99", [Some("Red"), Some("M"), None]),
                variant(12, "19.99", [Some("Blue"), Some("S"), None]),
            ],
            images: vec![],
        };
        let record = project_product(product).expect("projection should succeed");
        assert_eq!(record.colors, "Red,Blue");
        assert_eq!(record.sizes, "S,M");
    }

    #[test]
    fn option_name_match_is_case_insensitive() {
        let product = Product {
            id: 3,
            title: "Tee".to_string(),
            options: vec![option("color", 1, &[])],
            variants: vec![variant(10, "5.00", [Some("Green"), None, None])],
            images: vec![],
        };
        let record = project_product(product).expect("projection should succeed");
        assert_eq!(record.colors, "Green");
    }

    #[test]
    fn falls_back_to_declared_option_values_when_variants_resolve_nothing() {
        let product = Product {
            id: 4,
            title: "Poster".to_string(),
            options: vec![option("Size", 1, &["A2", "A3"])],
            variants: vec![variant(10, "12.00", [None, None, None])],
            images: vec![],
        };
        let record = project_product(product).expect("projection should succeed");
        assert_eq!(record.sizes, "A2,A3");
    }

    #[test]
    fn price_comes_from_first_variant() {
        let product = Product {
            id: 5,
            title: "Tee".to_string(),
            options: vec![],
            variants: vec![
                variant(10, "19.99", [None, None, None]),
                variant(11, "24.99", [None, None, None]),
            ],
            images: vec![],
        };
        let record = project_product(product).expect("projection should succeed");
        assert!((record.price - 19.99).abs() < f64::EPSILON);
    }

    #[test]
    fn image_paths_are_comma_joined() {
        let product = Product {
            id: 6,
            title: "Tee".to_string(),
            options: vec![],
            variants: vec![variant(10, "1.00", [None, None, None])],
            images: vec![
                ProductImage {
                    id: Some(1),
                    src: "https://cdn.example.com/a.jpg".to_string(),
                },
                ProductImage {
                    id: Some(2),
                    src: "https://cdn.example.com/b.jpg".to_string(),
                },
            ],
        };
        let record = project_product(product).expect("projection should succeed");
        assert_eq!(
            record.image_paths,
            "https://cdn.example.com/a.jpg,https://cdn.example.com/b.jpg"
        );
    }

    #[test]
    fn product_without_variants_is_a_projection_error() {
        let product = Product {
            id: 7,
            title: "Ghost".to_string(),
            options: vec![],
            variants: vec![],
            images: vec![],
        };
        let result = project_product(product);
        assert!(matches!(
            result,
            Err(ClientError::Projection { record_id: 7, .. })
        ));
    }

    #[test]
    fn unparseable_price_is_a_projection_error() {
        let product = Product {
            id: 8,
            title: "Tee".to_string(),
            options: vec![],
            variants: vec![variant(10, "free", [None, None, None])],
            images: vec![],
        };
        assert!(matches!(
            project_product(product),
            Err(ClientError::Projection { record_id: 8, .. })
        ));
    }

    #[test]
    fn order_line_items_are_pipe_joined() {
        let order = Order {
            id: 100,
            email: Some("buyer@example.com".to_string()),
            created_at: Utc::now(),
            total_price: "54.50".to_string(),
            line_items: vec![
                LineItem {
                    name: "Hoodie - Red / M".to_string(),
                    quantity: 2,
                },
                LineItem {
                    name: "Sticker".to_string(),
                    quantity: 1,
                },
            ],
        };
        let record = project_order(order).expect("projection should succeed");
        assert_eq!(record.line_items, "Hoodie - Red / M x 2 | Sticker x 1");
        assert!((record.total_price - 54.50).abs() < f64::EPSILON);
    }

    #[test]
    fn order_with_no_line_items_projects_empty_string() {
        let order = Order {
            id: 101,
            email: None,
            created_at: Utc::now(),
            total_price: "0.00".to_string(),
            line_items: vec![],
        };
        let record = project_order(order).expect("projection should succeed");
        assert_eq!(record.line_items, "");
        assert_eq!(record.line_item_count(), 0);
    }

    #[test]
    fn unparseable_total_price_is_a_projection_error() {
        let order = Order {
            id: 102,
            email: None,
            created_at: Utc::now(),
            total_price: "n/a".to_string(),
            line_items: vec![],
        };
        assert!(matches!(
            project_order(order),
            Err(ClientError::Projection { record_id: 102, .. })
        ));
    }
}
