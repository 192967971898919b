use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::{CurrentUser, remember_user};
use crate::forms::profile::{ChangePasswordForm, UpdateProfileForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::profile as profile_service;

#[get("")]
pub async fn show_profile(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match profile_service::load_profile_page(repo.get_ref(), &user) {
        Ok(account) => {
            let mut context = base_context(&flash_messages, Some(&user), "profile");
            context.insert("account", &account);
            render_template(&tera, "profile/index.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Bạn cần đăng nhập để thực hiện hành động này.").send();
            redirect("/auth/login")
        }
        Err(err) => {
            log::error!("Failed to load profile: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("")]
pub async fn update_profile(
    request: HttpRequest,
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<UpdateProfileForm>,
) -> impl Responder {
    match profile_service::update_profile(repo.get_ref(), &user, form) {
        Ok(updated) => {
            // Keep the navbar name in sync with the stored profile.
            if let Err(err) = remember_user(&request, &CurrentUser::from(&updated)) {
                log::error!("Failed to refresh session claims: {err}");
            }
            FlashMessage::success("Cập nhật hồ sơ thành công!").send();
            redirect("/profile")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Bạn cần đăng nhập để thực hiện hành động này.").send();
            redirect("/auth/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/profile")
        }
        Err(err) => {
            log::error!("Failed to update profile: {err}");
            FlashMessage::error("Không thể cập nhật hồ sơ. Vui lòng thử lại.").send();
            redirect("/profile")
        }
    }
}

#[post("/password")]
pub async fn change_password(
    user: CurrentUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ChangePasswordForm>,
) -> impl Responder {
    match profile_service::change_password(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Đổi mật khẩu thành công!").send();
            redirect("/profile")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Bạn cần đăng nhập để thực hiện hành động này.").send();
            redirect("/auth/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/profile")
        }
        Err(err) => {
            log::error!("Failed to change password: {err}");
            FlashMessage::error("Không thể đổi mật khẩu. Vui lòng thử lại.").send();
            redirect("/profile")
        }
    }
}
