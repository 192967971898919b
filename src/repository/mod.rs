use crate::db::{DbConnection, DbPool};
use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::{
    AdminProductRow, NewProduct, Product, ProductDetail, ProductListQuery, ProductSummary,
    UpdateProduct,
};
use crate::domain::product_image::NewProductImage;
use crate::domain::user::{NewUser, UpdateProfile, User, UserCredentials};
use crate::repository::errors::RepositoryResult;

pub mod brand;
pub mod category;
pub mod errors;
pub mod product;
pub mod user;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over product records.
pub trait ProductReader {
    /// Fetch one product regardless of visibility, for the admin editor.
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;
    /// Fetch one active product with its gallery and reviews resolved.
    fn get_product_detail(&self, id: &str) -> RepositoryResult<Option<ProductDetail>>;
    /// Count and list summaries matching `query`.
    fn list_summaries(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<ProductSummary>)>;
    /// Count and list admin table rows matching `query`.
    fn list_admin_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<AdminProductRow>)>;
    /// Active products ordered by units sold, best sellers first.
    fn list_best_selling(&self, limit: usize) -> RepositoryResult<Vec<ProductSummary>>;
    /// Active products ordered by mean review rating, best first.
    fn list_top_rated(&self, limit: usize) -> RepositoryResult<Vec<ProductSummary>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: &str, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: &str) -> RepositoryResult<()>;
    /// Attach gallery images in bulk, returning how many were stored.
    fn create_product_images(&self, images: &[NewProductImage]) -> RepositoryResult<usize>;
    /// Detach every gallery image of a product, returning how many went.
    fn delete_product_images(&self, product_id: &str) -> RepositoryResult<usize>;
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Read-only operations over brand records.
pub trait BrandReader {
    fn list_brands(&self) -> RepositoryResult<Vec<Brand>>;
}

/// Read-only operations over user records.
pub trait UserReader {
    fn get_user_by_id(&self, id: &str) -> RepositoryResult<Option<User>>;
    /// Lookup by lowercase email, with the stored password hash attached.
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<UserCredentials>>;
}

/// Write operations over user records.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_profile(&self, user_id: &str, updates: &UpdateProfile) -> RepositoryResult<User>;
    fn update_password(&self, user_id: &str, password_hash: &str) -> RepositoryResult<()>;
}
