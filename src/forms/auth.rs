use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::user::NewUser;
use crate::forms::sanitize_inline_text;

pub type AuthFormResult<T> = Result<T, AuthFormError>;

#[derive(Debug, Error)]
pub enum AuthFormError {
    #[error("{}", crate::forms::validation_messages(.0))]
    Validation(#[from] ValidationErrors),
}

/// Payload of the sign-in form.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Email không hợp lệ."))]
    pub email: String,
    #[validate(length(min = 1, message = "Vui lòng nhập mật khẩu."))]
    pub password: String,
}

impl LoginForm {
    /// Validate and normalize into a `(email, password)` pair. Emails
    /// are matched lowercase.
    pub fn into_credentials(self) -> AuthFormResult<(String, String)> {
        self.validate()?;
        Ok((self.email.trim().to_lowercase(), self.password))
    }
}

/// Payload of the registration form.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 2, message = "Họ tên phải có ít nhất 2 ký tự."))]
    pub full_name: String,
    #[validate(email(message = "Email không hợp lệ."))]
    pub email: String,
    #[validate(length(min = 6, message = "Mật khẩu phải có ít nhất 6 ký tự."))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Mật khẩu xác nhận không khớp."))]
    pub password_confirm: String,
}

impl RegisterForm {
    /// Validate and build the account payload with `password_hash`
    /// supplied by the caller.
    pub fn into_new_user(self, password_hash: String) -> AuthFormResult<NewUser> {
        self.validate()?;

        let full_name = sanitize_inline_text(&self.full_name);
        let mut new_user = NewUser::new(&self.email, password_hash);
        if !full_name.is_empty() {
            new_user = new_user.with_full_name(full_name);
        }

        Ok(new_user)
    }

    /// The raw password, for hashing before conversion.
    pub fn password(&self) -> &str {
        &self.password
    }
}
