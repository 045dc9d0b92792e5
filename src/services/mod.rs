//! Service layer between the HTTP routes and the repository.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod browse;
pub mod settings;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing, expired or foreign anti-forgery token.
    #[error("unauthorized")]
    Unauthorized,

    #[error("query failed: {0}")]
    QueryFailed(#[from] RepositoryError),

    /// The category tabs could not be listed.
    #[error("failed to load categories: {0}")]
    CategoriesUnavailable(RepositoryError),

    #[error("form error: {0}")]
    Form(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<tera::Error> for ServiceError {
    fn from(err: tera::Error) -> Self {
        ServiceError::Internal(format!("template error: {err}"))
    }
}
