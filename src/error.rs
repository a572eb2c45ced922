//! Service-wide error taxonomy.
//!
//! Three caller-visible kinds plus an internal catch-all. Handlers return
//! `ServiceResult<HttpResponse>` and rely on the `ResponseError` impl to
//! pick the status code; repository `anyhow` errors convert via `?`.

use actix_web::{http::StatusCode, HttpResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A referenced record does not exist. 404.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The caller lacks the required club role or self-ownership. 403.
    #[error("permission denied: {0}")]
    PermissionDenied(&'static str),

    /// Malformed or out-of-contract input, rejected before any write. 400.
    #[error("{0}")]
    InvalidInput(String),

    /// Infrastructure failure (database, redis). 500, details logged only.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl actix_web::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ServiceError::Internal(e) = self {
            log::error!("internal error: {e:?}");
            return HttpResponse::InternalServerError().body("internal error");
        }
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
