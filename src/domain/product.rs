use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::PLACEHOLDER_IMAGE;
use crate::domain::review::Review;
use crate::domain::sort::ProductSort;
use crate::pagination::Pagination;

/// Free-form specification entries, keyed by label. Insertion order is
/// preserved so the product page lists entries the way the editor
/// entered them.
pub type SpecificationMap = serde_json::Map<String, serde_json::Value>;

/// A full product row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub specifications: SpecificationMap,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// The stored image reference, or the placeholder path when the row has
/// none.
pub fn display_image_url(image_url: Option<String>) -> String {
    image_url
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

/// Just enough of a product to render a listing card. The image URL is
/// always present; rows without one get the placeholder path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub brand_name: Option<String>,
}

impl ProductSummary {
    pub fn new(
        id: String,
        name: String,
        price: f64,
        image_url: Option<String>,
        brand_name: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            price,
            image_url: display_image_url(image_url),
            brand_name,
        }
    }
}

/// Everything the product page shows: the summary fields plus gallery
/// images and reviews, newest review first.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub image_url: String,
    pub brand_name: Option<String>,
    pub category_name: Option<String>,
    pub specifications: SpecificationMap,
    pub images: Vec<String>,
    pub reviews: Vec<Review>,
}

/// Row shape for the admin product table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminProductRow {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub brand_name: Option<String>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub specifications: SpecificationMap,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, stock_quantity: i32) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            stock_quantity,
            category_id: None,
            brand_id: None,
            image_url: None,
            is_active: true,
            specifications: SpecificationMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_brand(mut self, brand_id: impl Into<String>) -> Self {
        self.brand_id = Some(brand_id.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_specifications(mut self, specifications: SpecificationMap) -> Self {
        self.specifications = specifications;
        self
    }
}

/// Full-row replacement payload for editing a product.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub specifications: SpecificationMap,
    pub updated_at: NaiveDateTime,
}

impl From<NewProduct> for UpdateProduct {
    fn from(payload: NewProduct) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            price: payload.price,
            stock_quantity: payload.stock_quantity,
            category_id: payload.category_id,
            brand_id: payload.brand_id,
            image_url: payload.image_url,
            is_active: payload.is_active,
            specifications: payload.specifications,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Filters, ordering and paging for product listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListQuery {
    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    pub search: Option<String>,
    pub include_inactive: bool,
    pub sort: ProductSort,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn brand(mut self, brand_id: impl Into<String>) -> Self {
        self.brand_id = Some(brand_id.into());
        self
    }

    /// Case-insensitive substring match over name and description.
    pub fn search(mut self, keyword: impl Into<String>) -> Self {
        self.search = Some(keyword.into());
        self
    }

    /// Include products hidden from the storefront.
    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn sort(mut self, sort: ProductSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_substitutes_placeholder_for_missing_image() {
        let summary = ProductSummary::new("p1".into(), "Phone".into(), 1.0, None, None);
        assert_eq!(summary.image_url, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn summary_treats_empty_image_as_missing() {
        let summary =
            ProductSummary::new("p1".into(), "Phone".into(), 1.0, Some(String::new()), None);
        assert_eq!(summary.image_url, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn summary_keeps_real_image() {
        let summary = ProductSummary::new(
            "p1".into(),
            "Phone".into(),
            1.0,
            Some("/media/a.png".into()),
            Some("Apple".into()),
        );
        assert_eq!(summary.image_url, "/media/a.png");
    }

    #[test]
    fn list_query_builder_collects_filters() {
        let query = ProductListQuery::new()
            .category("c1")
            .brand("b1")
            .paginate(2, 12);
        assert_eq!(query.category_id.as_deref(), Some("c1"));
        assert_eq!(query.brand_id.as_deref(), Some("b1"));
        assert_eq!(query.pagination, Some(Pagination::new(2, 12)));
        assert!(!query.include_inactive);
    }
}
