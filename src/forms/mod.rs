//! Form definitions backing the browse routes.

use thiserror::Error;

pub mod browse;

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("unknown action: {0}")]
    UnknownAction(String),
}
