use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::auth::CurrentUser;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::search::{self, SearchQuery};

#[get("/search")]
pub async fn show_search(
    params: web::Query<SearchQuery>,
    user: Option<CurrentUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = search::search_products(repo.get_ref(), params.0);

    let mut context = base_context(&flash_messages, user.as_ref(), "search");
    context.insert("keyword", &data.keyword);
    context.insert("results", &data.results);
    render_template(&tera, "search/index.html", &context)
}
