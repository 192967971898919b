use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;

use crate::domain::product::{
    AdminProductRow, NewProduct as DomainNewProduct, Product as DomainProduct, ProductDetail,
    ProductListQuery, ProductSummary, UpdateProduct as DomainUpdateProduct, display_image_url,
};
use crate::domain::product_image::NewProductImage as DomainNewProductImage;
use crate::domain::review::Review;
use crate::domain::sort::{SortDirection, SortField};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, ProductSummaryRow,
    UpdateProduct as DbUpdateProduct,
};
use crate::models::product_image::NewProductImage as DbNewProductImage;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductReader, ProductWriter};

const BEST_SELLING_SQL: &str = "\
SELECT p.id, p.name, p.price, p.image_url, b.name AS brand_name \
FROM products p \
JOIN order_items oi ON oi.product_id = p.id \
LEFT JOIN brands b ON b.id = p.brand_id \
WHERE p.is_active = 1 \
GROUP BY p.id, p.name, p.price, p.image_url, b.name \
ORDER BY SUM(oi.quantity) DESC, p.created_at DESC \
LIMIT ?";

const TOP_RATED_SQL: &str = "\
SELECT p.id, p.name, p.price, p.image_url, b.name AS brand_name \
FROM products p \
JOIN product_reviews r ON r.product_id = p.id \
LEFT JOIN brands b ON b.id = p.brand_id \
WHERE p.is_active = 1 \
GROUP BY p.id, p.name, p.price, p.image_url, b.name \
ORDER BY AVG(r.rating) DESC, COUNT(r.id) DESC \
LIMIT ?";

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn get_product_detail(&self, id: &str) -> RepositoryResult<Option<ProductDetail>> {
        use crate::schema::{brands, categories, products};

        let mut conn = self.conn()?;
        let row = products::table
            .left_join(brands::table)
            .left_join(categories::table)
            .filter(products::id.eq(id))
            .filter(products::is_active.eq(true))
            .select((
                DbProduct::as_select(),
                brands::name.nullable(),
                categories::name.nullable(),
            ))
            .first::<(DbProduct, Option<String>, Option<String>)>(&mut conn)
            .optional()?;

        let Some((db_product, brand_name, category_name)) = row else {
            return Ok(None);
        };

        let images = load_gallery_for_product(&mut conn, id)?;
        let reviews = load_reviews_for_product(&mut conn, id)?;
        let product: DomainProduct = db_product.into();

        Ok(Some(ProductDetail {
            image_url: display_image_url(product.image_url),
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock_quantity: product.stock_quantity,
            brand_name,
            category_name,
            specifications: product.specifications,
            images,
            reviews,
        }))
    }

    fn list_summaries(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<ProductSummary>)> {
        use crate::schema::{brands, products};

        let mut conn = self.conn()?;

        let total = count_products(&mut conn, &query)?;

        let mut items = products::table
            .left_join(brands::table)
            .select((
                products::id,
                products::name,
                products::price,
                products::image_url,
                brands::name.nullable(),
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            items = items.filter(products::is_active.eq(true));
        }

        if let Some(category_id) = query.category_id.as_ref() {
            items = items.filter(products::category_id.eq(category_id));
        }

        if let Some(brand_id) = query.brand_id.as_ref() {
            items = items.filter(products::brand_id.eq(brand_id));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{term}%");
            items = items.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern)),
            );
        }

        items = match (query.sort.field, query.sort.direction) {
            (SortField::Price, SortDirection::Asc) => items.order(products::price.asc()),
            (SortField::Price, SortDirection::Desc) => items.order(products::price.desc()),
            (SortField::Name, SortDirection::Asc) => items.order(products::name.asc()),
            (SortField::Name, SortDirection::Desc) => items.order(products::name.desc()),
            (SortField::CreatedAt, SortDirection::Asc) => items.order(products::created_at.asc()),
            (SortField::CreatedAt, SortDirection::Desc) => items.order(products::created_at.desc()),
        };

        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let rows = items.load::<(String, String, f64, Option<String>, Option<String>)>(&mut conn)?;

        let summaries = rows
            .into_iter()
            .map(|(id, name, price, image_url, brand_name)| {
                ProductSummary::new(id, name, price, image_url, brand_name)
            })
            .collect();

        Ok((total, summaries))
    }

    fn list_admin_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<AdminProductRow>)> {
        use crate::schema::{brands, products};

        let mut conn = self.conn()?;

        let total = count_products(&mut conn, &query)?;

        let mut items = products::table
            .left_join(brands::table)
            .select((
                products::id,
                products::name,
                products::price,
                products::stock_quantity,
                products::is_active,
                brands::name.nullable(),
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            items = items.filter(products::is_active.eq(true));
        }

        if let Some(category_id) = query.category_id.as_ref() {
            items = items.filter(products::category_id.eq(category_id));
        }

        if let Some(brand_id) = query.brand_id.as_ref() {
            items = items.filter(products::brand_id.eq(brand_id));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{term}%");
            items = items.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern)),
            );
        }

        items = items.order(products::created_at.desc());

        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset() as i64)
                .limit(pagination.per_page as i64);
        }

        let rows =
            items.load::<(String, String, f64, i32, bool, Option<String>)>(&mut conn)?;

        let products = rows
            .into_iter()
            .map(
                |(id, name, price, stock_quantity, is_active, brand_name)| AdminProductRow {
                    id,
                    name,
                    price,
                    stock_quantity,
                    is_active,
                    brand_name,
                },
            )
            .collect();

        Ok((total, products))
    }

    fn list_best_selling(&self, limit: usize) -> RepositoryResult<Vec<ProductSummary>> {
        let mut conn = self.conn()?;
        let rows = diesel::sql_query(BEST_SELLING_SQL)
            .bind::<BigInt, _>(limit as i64)
            .load::<ProductSummaryRow>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn list_top_rated(&self, limit: usize) -> RepositoryResult<Vec<ProductSummary>> {
        let mut conn = self.conn()?;
        let rows = diesel::sql_query(TOP_RATED_SQL)
            .bind::<BigInt, _>(limit as i64)
            .load::<ProductSummaryRow>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_new = DbNewProduct::try_from(new_product)?;

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: &str,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateProduct::try_from(updates)?;

        let target = products::table.filter(products::id.eq(product_id));
        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_product(&self, product_id: &str) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let target = products::table.filter(products::id.eq(product_id));
        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn create_product_images(
        &self,
        images: &[DomainNewProductImage],
    ) -> RepositoryResult<usize> {
        use crate::schema::product_images;

        if images.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let rows: Vec<DbNewProductImage> = images.iter().map(DbNewProductImage::from).collect();

        Ok(diesel::insert_into(product_images::table)
            .values(&rows)
            .execute(&mut conn)?)
    }

    fn delete_product_images(&self, product_id: &str) -> RepositoryResult<usize> {
        use crate::schema::product_images;

        let mut conn = self.conn()?;

        let target =
            product_images::table.filter(product_images::product_id.eq(product_id));
        Ok(diesel::delete(target).execute(&mut conn)?)
    }
}

fn count_products(conn: &mut SqliteConnection, query: &ProductListQuery) -> RepositoryResult<usize> {
    use crate::schema::products;

    let mut count_query = products::table.into_boxed::<diesel::sqlite::Sqlite>();

    if !query.include_inactive {
        count_query = count_query.filter(products::is_active.eq(true));
    }

    if let Some(category_id) = query.category_id.as_ref() {
        count_query = count_query.filter(products::category_id.eq(category_id));
    }

    if let Some(brand_id) = query.brand_id.as_ref() {
        count_query = count_query.filter(products::brand_id.eq(brand_id));
    }

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{term}%");
        count_query = count_query.filter(
            products::name
                .like(pattern.clone())
                .or(products::description.like(pattern)),
        );
    }

    let total = count_query.count().get_result::<i64>(conn)?;
    Ok(total as usize)
}

/// Gallery URLs in display order: explicit position first, then age, then
/// id so equal positions stay stable.
fn load_gallery_for_product(
    conn: &mut SqliteConnection,
    product_id: &str,
) -> RepositoryResult<Vec<String>> {
    use crate::schema::product_images;

    let urls = product_images::table
        .filter(product_images::product_id.eq(product_id))
        .order((
            product_images::sort_order.asc(),
            product_images::created_at.asc(),
            product_images::id.asc(),
        ))
        .select(product_images::image_url)
        .load::<String>(conn)?;

    Ok(urls)
}

fn load_reviews_for_product(
    conn: &mut SqliteConnection,
    product_id: &str,
) -> RepositoryResult<Vec<Review>> {
    use crate::schema::{product_reviews, users};

    let rows = product_reviews::table
        .left_join(users::table)
        .filter(product_reviews::product_id.eq(product_id))
        .order(product_reviews::created_at.desc())
        .select((
            product_reviews::id,
            product_reviews::rating,
            product_reviews::comment,
            users::full_name.nullable(),
            product_reviews::created_at,
        ))
        .load::<(String, i32, Option<String>, Option<String>, NaiveDateTime)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, rating, comment, author_name, created_at)| {
            Review::new(id, rating, comment, author_name, created_at)
        })
        .collect())
}
