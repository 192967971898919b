use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Serialize;
use tera::Tera;

use crate::auth::CurrentUser;
use crate::domain::sort::ProductSort;
use crate::pagination::page_window;
use crate::repository::DieselRepository;
use crate::routes::{PagerItem, base_context, render_template};
use crate::services::ServiceError;
use crate::services::catalog::{self, CatalogPageData, CatalogQuery};

/// Query parameters a catalog href carries. Values at their defaults
/// are left out of the string.
#[derive(Debug, Serialize)]
struct CatalogParams<'a> {
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    category_id: Option<&'a str>,
    #[serde(rename = "brandId", skip_serializing_if = "Option::is_none")]
    brand_id: Option<&'a str>,
    #[serde(rename = "sortBy", skip_serializing_if = "Option::is_none")]
    sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<usize>,
}

/// Catalog URL for the given filters. The first page, default ordering
/// and empty filters are elided.
fn catalog_href(
    category_id: Option<&str>,
    brand_id: Option<&str>,
    sort: ProductSort,
    page: usize,
) -> String {
    let params = CatalogParams {
        category_id: category_id.filter(|id| !id.is_empty()),
        brand_id: brand_id.filter(|id| !id.is_empty()),
        sort_by: (sort != ProductSort::default()).then(|| sort.as_param()),
        page: (page > 1).then_some(page),
    };

    match serde_qs::to_string(&params) {
        Ok(query) if !query.is_empty() => format!("/products?{query}"),
        _ => "/products".to_string(),
    }
}

fn build_pager(data: &CatalogPageData) -> Vec<PagerItem> {
    page_window(data.products.page, data.products.total_pages)
        .into_iter()
        .map(|link| PagerItem {
            href: link.number.map(|number| {
                catalog_href(
                    data.category_id.as_deref(),
                    data.brand_id.as_deref(),
                    data.sort,
                    number,
                )
            }),
            number: link.number,
            current: link.current,
        })
        .collect()
}

#[get("/products")]
pub async fn show_catalog(
    params: web::Query<CatalogQuery>,
    user: Option<CurrentUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = catalog::load_catalog_page(repo.get_ref(), params.0);

    let mut context = base_context(&flash_messages, user.as_ref(), "catalog");
    context.insert("products", &data.products);
    context.insert("categories", &data.categories);
    context.insert("brands", &data.brands);
    context.insert("selected_category", &data.category_id);
    context.insert("selected_brand", &data.brand_id);
    context.insert("sort_by", &data.sort.as_param());
    context.insert("pager", &build_pager(&data));
    render_template(&tera, "catalog/index.html", &context)
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<String>,
    user: Option<CurrentUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match catalog::load_product_page(repo.get_ref(), &product_id) {
        Ok(product) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "catalog");
            context.insert("product", &product);
            render_template(&tera, "catalog/detail.html", &context)
        }
        Err(ServiceError::NotFound) => {
            let context = base_context(&flash_messages, user.as_ref(), "catalog");
            match tera.render("catalog/not_found.html", &context) {
                Ok(body) => HttpResponse::NotFound()
                    .content_type(ContentType::html())
                    .body(body),
                Err(err) => {
                    log::error!("Failed to render template catalog/not_found.html: {err}");
                    HttpResponse::InternalServerError().finish()
                }
            }
        }
        Err(err) => {
            log::error!("Failed to show product: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
