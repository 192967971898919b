use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use mobistore::config::ServerConfig;
use mobistore::db::establish_connection_pool;
use mobistore::middleware::RedirectUnauthorized;
use mobistore::repository::DieselRepository;
use mobistore::routes::admin::{
    create_product, delete_product, show_edit_product, show_new_product, show_products,
    update_product, upload_products,
};
use mobistore::routes::auth::{login, logout, register, show_login, show_register};
use mobistore::routes::catalog::{show_catalog, show_product};
use mobistore::routes::main::show_index;
use mobistore::routes::profile::{change_password, show_profile, update_profile};
use mobistore::routes::register_template_filters;
use mobistore::routes::search::show_search;
use mobistore::storage::LocalImageStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let secret_key = match &config.secret {
        Some(secret) => Key::from(secret.as_bytes()),
        None => Key::generate(),
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);
    let store = LocalImageStore::new(config.media_root.clone(), "/media");

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let mut tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };
    register_template_filters(&mut tera);

    let media_root = config.media_root.clone();
    let domain = config.domain.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(Files::new("/media", media_root.clone()))
            .service(show_index)
            .service(show_catalog)
            .service(show_product)
            .service(show_search)
            .service(show_login)
            .service(login)
            .service(show_register)
            .service(register)
            .service(logout)
            .service(
                web::scope("/profile")
                    .wrap(RedirectUnauthorized)
                    .service(show_profile)
                    .service(update_profile)
                    .service(change_password),
            )
            .service(
                web::scope("/admin")
                    .wrap(RedirectUnauthorized)
                    .service(show_products)
                    .service(show_new_product)
                    .service(create_product)
                    .service(upload_products)
                    .service(show_edit_product)
                    .service(update_product)
                    .service(delete_product),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(store.clone()))
    })
    .bind((config.address, config.port))?
    .run()
    .await
}
