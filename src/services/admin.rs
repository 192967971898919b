use actix_multipart::form::tempfile::TempFile;
use serde::Deserialize;

use crate::ADMIN_PAGE_SIZE;
use crate::auth::CurrentUser;
use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::{AdminProductRow, Product, ProductListQuery, UpdateProduct};
use crate::domain::product_image::NewProductImage;
use crate::forms::products::{ProductForm, UploadProductsForm};
use crate::pagination::{Paginated, total_pages};
use crate::repository::{BrandReader, CategoryReader, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::{ImageStore, safe_file_name};

/// Query parameters accepted by the admin product table.
#[derive(Debug, Default, Deserialize)]
pub struct AdminProductsQuery {
    /// Page requested by the UI (1-based).
    pub page: Option<usize>,
}

/// Select options shared by the add and edit product forms.
pub struct ProductFormOptions {
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

/// Data required to render the edit product form.
pub struct ProductEditorData {
    pub product: Product,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

/// Loads one page of the admin product table, inactive rows included,
/// newest first. Read failures degrade to an empty table.
pub fn load_products_page<R>(
    repo: &R,
    user: &CurrentUser,
    query: AdminProductsQuery,
) -> ServiceResult<Paginated<AdminProductRow>>
where
    R: ProductReader + ?Sized,
{
    if !user.is_admin {
        return Err(ServiceError::Unauthorized);
    }

    let page = query.page.unwrap_or(1).max(1);
    let list_query = ProductListQuery::new()
        .include_inactive()
        .paginate(page, ADMIN_PAGE_SIZE);

    let (total, rows) = repo.list_admin_products(list_query).unwrap_or_else(|err| {
        log::error!("Failed to list admin products: {err}");
        (0, Vec::new())
    });

    Ok(Paginated::new(rows, page, total_pages(total, ADMIN_PAGE_SIZE)))
}

/// Loads the select options for the add product form.
pub fn load_form_options<R>(repo: &R, user: &CurrentUser) -> ServiceResult<ProductFormOptions>
where
    R: CategoryReader + BrandReader + ?Sized,
{
    if !user.is_admin {
        return Err(ServiceError::Unauthorized);
    }

    let categories = repo.list_categories()?;
    let brands = repo.list_brands()?;

    Ok(ProductFormOptions { categories, brands })
}

/// Loads the edit form for one product. Inactive products stay
/// editable.
pub fn load_product_editor<R>(
    repo: &R,
    user: &CurrentUser,
    product_id: &str,
) -> ServiceResult<ProductEditorData>
where
    R: ProductReader + CategoryReader + BrandReader + ?Sized,
{
    if !user.is_admin {
        return Err(ServiceError::Unauthorized);
    }

    let Some(product) = repo.get_product_by_id(product_id)? else {
        return Err(ServiceError::NotFound);
    };

    let categories = repo.list_categories()?;
    let brands = repo.list_brands()?;

    Ok(ProductEditorData {
        product,
        categories,
        brands,
    })
}

/// Creates a product from the submitted form, storing any uploaded
/// imagery. The product row commits first; gallery images that fail to
/// store or attach afterwards are logged and skipped rather than
/// undoing the create.
pub fn create_product<R, S>(
    repo: &R,
    store: &S,
    user: &CurrentUser,
    form: ProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    if !user.is_admin {
        return Err(ServiceError::Unauthorized);
    }

    let (fields, main_image, extra_images) = form.into_parts();
    let mut new_product = fields.into_new_product()?;

    if let Some(file) = main_image.filter(|file| file.size > 0) {
        let key = format!(
            "products/public/{}",
            safe_file_name(file.file_name.as_deref())
        );
        let url = store.save_image(file.file.path(), &key)?;
        new_product = new_product.with_image_url(url);
    }

    let created = repo.create_product(&new_product)?;

    attach_gallery(repo, store, &created.id, extra_images);

    Ok(created)
}

/// Validates and applies the edit form to an existing product. A fresh
/// set of gallery uploads replaces the stored one; without uploads the
/// gallery is left alone.
pub fn update_product<R, S>(
    repo: &R,
    store: &S,
    user: &CurrentUser,
    product_id: &str,
    form: ProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    if !user.is_admin {
        return Err(ServiceError::Unauthorized);
    }

    if product_id.trim().is_empty() {
        return Err(ServiceError::Form("ID sản phẩm không hợp lệ.".to_string()));
    }

    let (fields, main_image, extra_images) = form.into_parts();
    let mut payload = fields.into_new_product()?;

    if let Some(file) = main_image.filter(|file| file.size > 0) {
        let key = format!(
            "products/public/{}",
            safe_file_name(file.file_name.as_deref())
        );
        let url = store.save_image(file.file.path(), &key)?;
        payload = payload.with_image_url(url);
    }

    let updates = UpdateProduct::from(payload);
    let updated = repo.update_product(product_id, &updates)?;

    let replacements: Vec<TempFile> = extra_images
        .into_iter()
        .filter(|file| file.size > 0)
        .collect();
    if !replacements.is_empty() {
        if let Err(err) = repo.delete_product_images(product_id) {
            log::error!("Failed to clear gallery of product {product_id}: {err}");
        }
        attach_gallery(repo, store, product_id, replacements);
    }

    Ok(updated)
}

/// Deletes a product. Gallery rows go first; if that step fails the
/// product row is still removed and the leftover rows are logged.
pub fn delete_product<R>(repo: &R, user: &CurrentUser, product_id: &str) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    if !user.is_admin {
        return Err(ServiceError::Unauthorized);
    }

    if product_id.trim().is_empty() {
        return Err(ServiceError::Form("ID sản phẩm không hợp lệ.".to_string()));
    }

    if let Err(err) = repo.delete_product_images(product_id) {
        log::error!("Failed to delete images of product {product_id}: {err}");
    }

    repo.delete_product(product_id)?;
    Ok(())
}

/// Imports products from an uploaded CSV file, one active product per
/// row.
pub fn import_products<R>(
    repo: &R,
    user: &CurrentUser,
    mut form: UploadProductsForm,
) -> ServiceResult<usize>
where
    R: ProductWriter + ?Sized,
{
    if !user.is_admin {
        return Err(ServiceError::Unauthorized);
    }

    let uploads = form.parse()?;

    let mut created = 0usize;
    for product in &uploads {
        repo.create_product(product)?;
        created += 1;
    }

    Ok(created)
}

/// Stores each uploaded gallery file and attaches the survivors with
/// their submission position as `sort_order`. A failed upload keeps its
/// position as a gap.
fn attach_gallery<R, S>(repo: &R, store: &S, product_id: &str, files: Vec<TempFile>)
where
    R: ProductWriter + ?Sized,
    S: ImageStore + ?Sized,
{
    let mut images = Vec::new();
    for (position, file) in files
        .into_iter()
        .filter(|file| file.size > 0)
        .enumerate()
    {
        let key = format!(
            "products/public/{product_id}/{}",
            safe_file_name(file.file_name.as_deref())
        );
        match store.save_image(file.file.path(), &key) {
            Ok(url) => images.push(NewProductImage::new(product_id, url, position as i32)),
            Err(err) => {
                log::error!("Failed to store gallery image for product {product_id}: {err}");
            }
        }
    }

    if images.is_empty() {
        return;
    }

    if let Err(err) = repo.create_product_images(&images) {
        log::error!("Failed to attach gallery images to product {product_id}: {err}");
    }
}
