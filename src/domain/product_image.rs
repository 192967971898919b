use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A gallery image attached to a product. `sort_order` fixes the
/// display position; ties resolve by creation time, then id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub id: String,
    pub product_id: String,
    pub image_url: String,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
}

/// Payload for attaching a gallery image to a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductImage {
    pub product_id: String,
    pub image_url: String,
    pub sort_order: i32,
}

impl NewProductImage {
    pub fn new(
        product_id: impl Into<String>,
        image_url: impl Into<String>,
        sort_order: i32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            image_url: image_url.into(),
            sort_order,
        }
    }
}
