use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::domain::user::User;
use crate::forms::profile::{ChangePasswordForm, UpdateProfileForm};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads the signed-in user's stored profile. A missing row means the
/// identity cookie outlived the account.
pub fn load_profile_page<R>(repo: &R, user: &CurrentUser) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    repo.get_user_by_id(&user.id)?.ok_or(ServiceError::NotFound)
}

/// Applies profile edits for the signed-in user and returns the updated
/// row.
pub fn update_profile<R>(
    repo: &R,
    user: &CurrentUser,
    form: UpdateProfileForm,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let updates = form.into_update_profile()?;

    let updated = repo.update_profile(&user.id, &updates)?;
    Ok(updated)
}

/// Verifies the current password and stores an Argon2 hash of the new
/// one.
pub fn change_password<R>(
    repo: &R,
    user: &CurrentUser,
    form: ChangePasswordForm,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    let (current, new) = form.into_passwords()?;

    let Some(credentials) = repo.get_user_by_email(&user.email)? else {
        return Err(ServiceError::NotFound);
    };

    if !verify_password(&current, &credentials.password_hash)? {
        return Err(ServiceError::Form(
            "Mật khẩu hiện tại không đúng.".to_string(),
        ));
    }

    let new_hash = hash_password(&new)?;
    repo.update_password(&user.id, &new_hash)?;

    Ok(())
}
