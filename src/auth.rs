use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, error};
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::domain::user::User;

#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
    #[error("session serialization failed: {0}")]
    Session(#[from] serde_json::Error),
    #[error("failed to persist login session: {0}")]
    Login(#[from] actix_identity::error::LoginError),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::Hash(err)
    }
}

/// Claims carried by the identity cookie for the logged-in visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub is_admin: bool,
}

impl CurrentUser {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.full_name.clone(),
            is_admin: user.is_admin,
        }
    }
}

impl TryFrom<&Identity> for CurrentUser {
    type Error = Error;

    fn try_from(identity: &Identity) -> Result<Self, Self::Error> {
        let raw = identity.id().map_err(error::ErrorUnauthorized)?;
        serde_json::from_str(&raw).map_err(error::ErrorUnauthorized)
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let result = match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => Self::try_from(&identity),
            Err(err) => Err(error::ErrorUnauthorized(err)),
        };
        ready(result)
    }
}

/// Attach `user` to the session behind the identity cookie.
pub fn remember_user(request: &HttpRequest, user: &CurrentUser) -> Result<(), AuthError> {
    let claims = serde_json::to_string(user)?;
    Identity::login(&request.extensions(), claims)?;
    Ok(())
}

/// Salted Argon2 hash of `password` for storage.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check `password` against a stored Argon2 hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
