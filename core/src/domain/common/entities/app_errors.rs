use thiserror::Error;

use crate::domain::query::errors::QueryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    #[error("Internal server error")]
    InternalServerError,
}
