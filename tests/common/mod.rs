//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use mobistore::db::{DbPool, establish_connection_pool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

pub fn datetime(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").expect("valid datetime literal")
}

pub fn seed_category(pool: &DbPool, id: &str, name: &str) {
    use mobistore::schema::categories;

    let mut conn = pool.get().expect("connection");
    diesel::insert_into(categories::table)
        .values((categories::id.eq(id), categories::name.eq(name)))
        .execute(&mut conn)
        .expect("seed category");
}

pub fn seed_brand(pool: &DbPool, id: &str, name: &str) {
    use mobistore::schema::brands;

    let mut conn = pool.get().expect("connection");
    diesel::insert_into(brands::table)
        .values((brands::id.eq(id), brands::name.eq(name)))
        .execute(&mut conn)
        .expect("seed brand");
}

pub fn seed_review(
    pool: &DbPool,
    id: &str,
    product_id: &str,
    user_id: &str,
    rating: i32,
    comment: Option<&str>,
    created_at: &str,
) {
    use mobistore::schema::product_reviews;

    let mut conn = pool.get().expect("connection");
    diesel::insert_into(product_reviews::table)
        .values((
            product_reviews::id.eq(id),
            product_reviews::product_id.eq(product_id),
            product_reviews::user_id.eq(user_id),
            product_reviews::rating.eq(rating),
            product_reviews::comment.eq(comment),
            product_reviews::created_at.eq(datetime(created_at)),
        ))
        .execute(&mut conn)
        .expect("seed review");
}

pub fn seed_order_item(pool: &DbPool, id: &str, product_id: &str, quantity: i32) {
    use mobistore::schema::order_items;

    let mut conn = pool.get().expect("connection");
    diesel::insert_into(order_items::table)
        .values((
            order_items::id.eq(id),
            order_items::product_id.eq(product_id),
            order_items::quantity.eq(quantity),
        ))
        .execute(&mut conn)
        .expect("seed order item");
}

pub fn seed_gallery_image(
    pool: &DbPool,
    id: &str,
    product_id: &str,
    image_url: &str,
    sort_order: i32,
    created_at: &str,
) {
    use mobistore::schema::product_images;

    let mut conn = pool.get().expect("connection");
    diesel::insert_into(product_images::table)
        .values((
            product_images::id.eq(id),
            product_images::product_id.eq(product_id),
            product_images::image_url.eq(image_url),
            product_images::sort_order.eq(sort_order),
            product_images::created_at.eq(datetime(created_at)),
        ))
        .execute(&mut conn)
        .expect("seed gallery image");
}

/// Pin a product's creation time so ordering tests are deterministic.
pub fn set_product_created_at(pool: &DbPool, product_id: &str, created_at: &str) {
    use mobistore::schema::products;

    let mut conn = pool.get().expect("connection");
    diesel::update(products::table.filter(products::id.eq(product_id)))
        .set(products::created_at.eq(datetime(created_at)))
        .execute(&mut conn)
        .expect("set created_at");
}
