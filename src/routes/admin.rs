use std::collections::HashMap;

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::auth::CurrentUser;
use crate::domain::product::AdminProductRow;
use crate::forms::products::{ProductFields, ProductForm, UploadProductsForm};
use crate::pagination::{Paginated, page_window};
use crate::repository::DieselRepository;
use crate::routes::{PagerItem, base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::admin::{self as admin_service, AdminProductsQuery, ProductFormOptions};
use crate::storage::LocalImageStore;

const NO_ADMIN_ACCESS: &str = "Bạn không có quyền truy cập trang quản trị.";

fn admin_pager(page: &Paginated<AdminProductRow>) -> Vec<PagerItem> {
    page_window(page.page, page.total_pages)
        .into_iter()
        .map(|link| PagerItem {
            href: link.number.map(|number| {
                if number > 1 {
                    format!("/admin/products?page={number}")
                } else {
                    "/admin/products".to_string()
                }
            }),
            number: link.number,
            current: link.current,
        })
        .collect()
}

fn product_form_context(
    flash_messages: &IncomingFlashMessages,
    user: &CurrentUser,
    options: &ProductFormOptions,
    fields: &ProductFields,
    errors: &HashMap<String, String>,
    form_action: &str,
    editing: bool,
) -> Context {
    let mut context = base_context(flash_messages, Some(user), "admin");
    context.insert("categories", &options.categories);
    context.insert("brands", &options.brands);
    context.insert("fields", fields);
    context.insert("errors", errors);
    context.insert("form_action", form_action);
    context.insert("editing", &editing);
    context
}

#[get("/products")]
pub async fn show_products(
    params: web::Query<AdminProductsQuery>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::load_products_page(repo.get_ref(), &user, params.0) {
        Ok(products) => {
            let mut context = base_context(&flash_messages, Some(&user), "admin");
            context.insert("pager", &admin_pager(&products));
            context.insert("products", &products);
            render_template(&tera, "admin/products.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(NO_ADMIN_ACCESS).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/new")]
pub async fn show_new_product(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::load_form_options(repo.get_ref(), &user) {
        Ok(options) => {
            let fields = ProductFields {
                is_active: true,
                ..ProductFields::default()
            };
            let context = product_form_context(
                &flash_messages,
                &user,
                &options,
                &fields,
                &HashMap::new(),
                "/admin/products",
                false,
            );
            render_template(&tera, "admin/product_form.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(NO_ADMIN_ACCESS).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load product form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products")]
pub async fn create_product(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> impl Responder {
    let snapshot = form.fields_snapshot();

    match admin_service::create_product(repo.get_ref(), store.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Thêm sản phẩm thành công!").send();
            redirect("/admin/products")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(NO_ADMIN_ACCESS).send();
            redirect("/")
        }
        Err(ServiceError::Validation(errors)) => {
            match admin_service::load_form_options(repo.get_ref(), &user) {
                Ok(options) => {
                    let context = product_form_context(
                        &flash_messages,
                        &user,
                        &options,
                        &snapshot,
                        &errors,
                        "/admin/products",
                        false,
                    );
                    render_template(&tera, "admin/product_form.html", &context)
                }
                Err(err) => {
                    log::error!("Failed to reload product form: {err}");
                    HttpResponse::InternalServerError().finish()
                }
            }
        }
        Err(ServiceError::Storage(err)) => {
            log::error!("Failed to store product image: {err}");
            FlashMessage::error("Không tải được ảnh lên. Vui lòng thử lại.").send();
            redirect("/admin/products/new")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/products/new")
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            FlashMessage::error("Không thể thêm sản phẩm. Vui lòng thử lại.").send();
            redirect("/admin/products/new")
        }
    }
}

#[get("/products/{product_id}/edit")]
pub async fn show_edit_product(
    product_id: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::load_product_editor(repo.get_ref(), &user, &product_id) {
        Ok(editor) => {
            let fields = ProductFields::from_product(&editor.product);
            let options = ProductFormOptions {
                categories: editor.categories,
                brands: editor.brands,
            };
            let mut context = product_form_context(
                &flash_messages,
                &user,
                &options,
                &fields,
                &HashMap::new(),
                &format!("/admin/products/{}/edit", editor.product.id),
                true,
            );
            context.insert("product_id", &editor.product.id);
            render_template(&tera, "admin/product_form.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(NO_ADMIN_ACCESS).send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Không tìm thấy sản phẩm.").send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("Failed to load product editor: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/edit")]
pub async fn update_product(
    product_id: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> impl Responder {
    let snapshot = form.fields_snapshot();
    let edit_url = format!("/admin/products/{product_id}/edit");

    match admin_service::update_product(repo.get_ref(), store.get_ref(), &user, &product_id, form)
    {
        Ok(_) => {
            FlashMessage::success("Cập nhật sản phẩm thành công!").send();
            redirect("/admin/products")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(NO_ADMIN_ACCESS).send();
            redirect("/")
        }
        Err(ServiceError::Validation(errors)) => {
            match admin_service::load_form_options(repo.get_ref(), &user) {
                Ok(options) => {
                    let mut context = product_form_context(
                        &flash_messages,
                        &user,
                        &options,
                        &snapshot,
                        &errors,
                        &edit_url,
                        true,
                    );
                    context.insert("product_id", product_id.as_str());
                    render_template(&tera, "admin/product_form.html", &context)
                }
                Err(err) => {
                    log::error!("Failed to reload product form: {err}");
                    HttpResponse::InternalServerError().finish()
                }
            }
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Không tìm thấy sản phẩm.").send();
            redirect("/admin/products")
        }
        Err(ServiceError::Storage(err)) => {
            log::error!("Failed to store product image: {err}");
            FlashMessage::error("Không tải được ảnh lên. Vui lòng thử lại.").send();
            redirect(&edit_url)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&edit_url)
        }
        Err(err) => {
            log::error!("Failed to update product: {err}");
            FlashMessage::error("Không thể cập nhật sản phẩm. Vui lòng thử lại.").send();
            redirect(&edit_url)
        }
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<String>,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match admin_service::delete_product(repo.get_ref(), &user, &product_id) {
        Ok(()) => {
            FlashMessage::success("Xóa sản phẩm thành công!").send();
            redirect("/admin/products")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(NO_ADMIN_ACCESS).send();
            redirect("/")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Không tìm thấy sản phẩm.").send();
            redirect("/admin/products")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("Failed to delete product: {err}");
            FlashMessage::error("Không thể xóa sản phẩm. Vui lòng thử lại.").send();
            redirect("/admin/products")
        }
    }
}

#[post("/products/upload")]
pub async fn upload_products(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadProductsForm>,
) -> impl Responder {
    match admin_service::import_products(repo.get_ref(), &user, form) {
        Ok(count) => {
            FlashMessage::success(format!("Đã nhập {count} sản phẩm.")).send();
            redirect("/admin/products")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error(NO_ADMIN_ACCESS).send();
            redirect("/")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/products")
        }
        Err(err) => {
            log::error!("Failed to import products: {err}");
            FlashMessage::error("Không thể nhập tệp CSV. Vui lòng thử lại.").send();
            redirect("/admin/products")
        }
    }
}
