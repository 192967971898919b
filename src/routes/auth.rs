use actix_identity::Identity;
use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::{CurrentUser, remember_user};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth as auth_service;

#[get("/auth/login")]
pub async fn show_login(
    user: Option<CurrentUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }

    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/auth/login")]
pub async fn login(
    request: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    match auth_service::login_user(repo.get_ref(), form) {
        Ok(current) => {
            if let Err(err) = remember_user(&request, &current) {
                log::error!("Failed to persist login session: {err}");
                FlashMessage::error("Không thể đăng nhập. Vui lòng thử lại.").send();
                return redirect("/auth/login");
            }
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Email hoặc mật khẩu không đúng.").send();
            redirect("/auth/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/auth/login")
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            FlashMessage::error("Không thể đăng nhập. Vui lòng thử lại.").send();
            redirect("/auth/login")
        }
    }
}

#[get("/auth/register")]
pub async fn show_register(
    user: Option<CurrentUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }

    let context = base_context(&flash_messages, None, "register");
    render_template(&tera, "auth/register.html", &context)
}

#[post("/auth/register")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    match auth_service::register_user(repo.get_ref(), form) {
        Ok(_) => {
            FlashMessage::success("Đăng ký thành công! Vui lòng đăng nhập.").send();
            redirect("/auth/login")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Email này đã được đăng ký.").send();
            redirect("/auth/register")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/auth/register")
        }
        Err(err) => {
            log::error!("Failed to register account: {err}");
            FlashMessage::error("Không thể đăng ký. Vui lòng thử lại.").send();
            redirect("/auth/register")
        }
    }
}

#[post("/auth/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/auth/login")
}
