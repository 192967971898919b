use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{Double, Nullable, Text};

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductSummary,
    UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::products)]
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
    /// JSON-serialized specification map.
    pub specifications: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock_quantity: product.stock_quantity,
            category_id: product.category_id,
            brand_id: product.brand_id,
            image_url: product.image_url,
            is_active: product.is_active,
            specifications: serde_json::from_str(&product.specifications).unwrap_or_default(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub specifications: String,
}

impl TryFrom<&DomainNewProduct> for NewProduct {
    type Error = serde_json::Error;

    fn try_from(payload: &DomainNewProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: payload.name.clone(),
            description: payload.description.clone(),
            price: payload.price,
            stock_quantity: payload.stock_quantity,
            category_id: payload.category_id.clone(),
            brand_id: payload.brand_id.clone(),
            image_url: payload.image_url.clone(),
            is_active: payload.is_active,
            specifications: serde_json::to_string(&payload.specifications)?,
        })
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub specifications: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<&DomainUpdateProduct> for UpdateProduct {
    type Error = serde_json::Error;

    fn try_from(updates: &DomainUpdateProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            name: updates.name.clone(),
            description: updates.description.clone(),
            price: updates.price,
            stock_quantity: updates.stock_quantity,
            category_id: updates.category_id.clone(),
            brand_id: updates.brand_id.clone(),
            image_url: updates.image_url.clone(),
            is_active: updates.is_active,
            specifications: serde_json::to_string(&updates.specifications)?,
            updated_at: updates.updated_at,
        })
    }
}

/// Row shape returned by the raw aggregate queries on the home page.
#[derive(Debug, QueryableByName)]
pub struct ProductSummaryRow {
    #[diesel(sql_type = Text)]
    pub id: String,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Double)]
    pub price: f64,
    #[diesel(sql_type = Nullable<Text>)]
    pub image_url: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub brand_name: Option<String>,
}

impl From<ProductSummaryRow> for ProductSummary {
    fn from(row: ProductSummaryRow) -> Self {
        ProductSummary::new(row.id, row.name, row.price, row.image_url, row.brand_name)
    }
}
