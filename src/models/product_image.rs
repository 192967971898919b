use diesel::prelude::*;

use crate::domain::product_image::NewProductImage as DomainNewProductImage;

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage {
    pub id: String,
    pub product_id: String,
    pub image_url: String,
    pub sort_order: i32,
}

impl From<&DomainNewProductImage> for NewProductImage {
    fn from(image: &DomainNewProductImage) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: image.product_id.clone(),
            image_url: image.image_url.clone(),
            sort_order: image.sort_order,
        }
    }
}
