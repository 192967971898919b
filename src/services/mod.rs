use std::collections::HashMap;

use thiserror::Error;

use crate::auth::AuthError;
use crate::forms::auth::AuthFormError;
use crate::forms::products::ProductFormError;
use crate::forms::profile::ProfileFormError;
use crate::repository::errors::RepositoryError;
use crate::storage::StorageError;

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod main;
pub mod profile;
pub mod search;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    Conflict,
    /// A human-readable form problem, shown as-is to the submitter.
    #[error("{0}")]
    Form(String),
    /// Per-field validation messages, keyed by field name.
    #[error("Dữ liệu không hợp lệ.")]
    Validation(HashMap<String, String>),
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(_) => ServiceError::Conflict,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<ProductFormError> for ServiceError {
    fn from(err: ProductFormError) -> Self {
        match err {
            ProductFormError::Validation(fields) => ServiceError::Validation(fields),
            other => ServiceError::Form(other.to_string()),
        }
    }
}

impl From<AuthFormError> for ServiceError {
    fn from(err: AuthFormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<ProfileFormError> for ServiceError {
    fn from(err: ProfileFormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}
