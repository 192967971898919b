use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::domain::user::User;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Registers a new account with an Argon2-hashed password. A duplicate
/// email surfaces as `ServiceError::Conflict`.
pub fn register_user<R>(repo: &R, form: RegisterForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    let password_hash = hash_password(form.password())?;
    let new_user = form.into_new_user(password_hash)?;

    let user = repo.create_user(&new_user)?;
    Ok(user)
}

/// Checks the submitted credentials and returns the session claims on
/// success. Unknown emails and wrong passwords are indistinguishable to
/// the caller.
pub fn login_user<R>(repo: &R, form: LoginForm) -> ServiceResult<CurrentUser>
where
    R: UserReader + ?Sized,
{
    let (email, password) = form.into_credentials()?;

    let Some(credentials) = repo.get_user_by_email(&email)? else {
        return Err(ServiceError::Unauthorized);
    };

    if !verify_password(&password, &credentials.password_hash)? {
        return Err(ServiceError::Unauthorized);
    }

    Ok(CurrentUser::from(&credentials.user))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::user::UserCredentials;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            full_name: Some("Nguyễn Văn An".to_string()),
            phone: None,
            is_admin: false,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn register_form() -> RegisterForm {
        RegisterForm {
            full_name: "Nguyễn Văn An".to_string(),
            email: "An@Example.com".to_string(),
            password: "secret1".to_string(),
            password_confirm: "secret1".to_string(),
        }
    }

    #[test]
    fn register_stores_hashed_password_and_lowercase_email() {
        let mut repo = MockRepository::new();

        repo.expect_create_user()
            .times(1)
            .withf(|new_user| {
                assert_eq!(new_user.email, "an@example.com");
                assert!(new_user.password_hash.starts_with("$argon2"));
                assert_ne!(new_user.password_hash, "secret1");
                true
            })
            .returning(|new_user| Ok(sample_user("u1", &new_user.email)));

        let user = register_user(&repo, register_form()).unwrap();

        assert_eq!(user.email, "an@example.com");
    }

    #[test]
    fn register_reports_duplicate_email_as_conflict() {
        let mut repo = MockRepository::new();

        repo.expect_create_user()
            .returning(|_| Err(RepositoryError::Conflict("users.email".to_string())));

        let result = register_user(&repo, register_form());

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn register_rejects_invalid_form_without_writing() {
        let mut repo = MockRepository::new();

        repo.expect_create_user().times(0);

        let form = RegisterForm {
            password: "123".to_string(),
            password_confirm: "123".to_string(),
            ..register_form()
        };

        let err = register_user(&repo, form).unwrap_err();

        match err {
            ServiceError::Form(message) => {
                assert!(message.contains("Mật khẩu phải có ít nhất 6 ký tự."));
            }
            other => panic!("expected form error, got {other:?}"),
        }
    }

    #[test]
    fn login_accepts_matching_credentials() {
        let mut repo = MockRepository::new();
        let stored = UserCredentials {
            user: sample_user("u1", "an@example.com"),
            password_hash: hash_password("secret1").unwrap(),
        };

        repo.expect_get_user_by_email()
            .times(1)
            .withf(|email| email == "an@example.com")
            .returning(move |_| Ok(Some(stored.clone())));

        let form = LoginForm {
            email: " An@Example.com ".to_string(),
            password: "secret1".to_string(),
        };

        let current = login_user(&repo, form).unwrap();

        assert_eq!(current.id, "u1");
        assert_eq!(current.email, "an@example.com");
        assert!(!current.is_admin);
    }

    #[test]
    fn login_rejects_wrong_password() {
        let mut repo = MockRepository::new();
        let stored = UserCredentials {
            user: sample_user("u1", "an@example.com"),
            password_hash: hash_password("secret1").unwrap(),
        };

        repo.expect_get_user_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let form = LoginForm {
            email: "an@example.com".to_string(),
            password: "wrong".to_string(),
        };

        let result = login_user(&repo, form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn login_rejects_unknown_email() {
        let mut repo = MockRepository::new();

        repo.expect_get_user_by_email().returning(|_| Ok(None));

        let form = LoginForm {
            email: "nobody@example.com".to_string(),
            password: "secret1".to_string(),
        };

        let result = login_user(&repo, form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
