use mockall::mock;

use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::{
    AdminProductRow, NewProduct, Product, ProductDetail, ProductListQuery, ProductSummary,
    UpdateProduct,
};
use crate::domain::product_image::NewProductImage;
use crate::domain::user::{NewUser, UpdateProfile, User, UserCredentials};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BrandReader, CategoryReader, ProductReader, ProductWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;
        fn get_product_detail(&self, id: &str) -> RepositoryResult<Option<ProductDetail>>;
        fn list_summaries(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<ProductSummary>)>;
        fn list_admin_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<AdminProductRow>)>;
        fn list_best_selling(&self, limit: usize) -> RepositoryResult<Vec<ProductSummary>>;
        fn list_top_rated(&self, limit: usize) -> RepositoryResult<Vec<ProductSummary>>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(
            &self,
            product_id: &str,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: &str) -> RepositoryResult<()>;
        fn create_product_images(&self, images: &[NewProductImage]) -> RepositoryResult<usize>;
        fn delete_product_images(&self, product_id: &str) -> RepositoryResult<usize>;
    }

    impl CategoryReader for Repository {
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    }

    impl BrandReader for Repository {
        fn list_brands(&self) -> RepositoryResult<Vec<Brand>>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: &str) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<UserCredentials>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_profile(&self, user_id: &str, updates: &UpdateProfile) -> RepositoryResult<User>;
        fn update_password(&self, user_id: &str, password_hash: &str) -> RepositoryResult<()>;
    }
}
