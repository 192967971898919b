use diesel::result::DatabaseErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(diesel::result::Error),
    #[error("stored data could not be decoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
