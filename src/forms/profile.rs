use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::user::UpdateProfile;
use crate::forms::sanitize_inline_text;
use crate::routes::empty_string_as_none;

pub type ProfileFormResult<T> = Result<T, ProfileFormError>;

#[derive(Debug, Error)]
pub enum ProfileFormError {
    #[error("{}", crate::forms::validation_messages(.0))]
    Validation(#[from] ValidationErrors),
}

/// Payload of the profile edit form. Blank fields clear the stored
/// value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileForm {
    #[validate(length(max = 128, message = "Họ tên quá dài."))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub full_name: Option<String>,
    #[validate(length(max = 20, message = "Số điện thoại quá dài."))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub phone: Option<String>,
}

impl UpdateProfileForm {
    /// Validate and sanitize into a domain `UpdateProfile`.
    pub fn into_update_profile(self) -> ProfileFormResult<UpdateProfile> {
        self.validate()?;

        let full_name = self
            .full_name
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty());
        let phone = self
            .phone
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty());

        Ok(UpdateProfile::new(full_name, phone))
    }
}

/// Payload of the change-password form.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordForm {
    #[validate(length(min = 1, message = "Vui lòng nhập mật khẩu hiện tại."))]
    pub current_password: String,
    #[validate(length(min = 6, message = "Mật khẩu mới phải có ít nhất 6 ký tự."))]
    pub new_password: String,
    #[validate(must_match(
        other = "new_password",
        message = "Mật khẩu xác nhận không khớp."
    ))]
    pub new_password_confirm: String,
}

impl ChangePasswordForm {
    /// Validate and split into `(current, new)` passwords.
    pub fn into_passwords(self) -> ProfileFormResult<(String, String)> {
        self.validate()?;
        Ok((self.current_password, self.new_password))
    }
}
