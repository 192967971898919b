use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::auth::CurrentUser;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::main as main_service;

#[get("/")]
pub async fn show_index(
    user: Option<CurrentUser>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = main_service::load_home_page(repo.get_ref());

    let mut context = base_context(&flash_messages, user.as_ref(), "home");
    context.insert("best_selling", &data.best_selling);
    context.insert("top_rated", &data.top_rated);
    render_template(&tera, "main/index.html", &context)
}
