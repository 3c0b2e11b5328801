use crate::api::errors::DomainError;
use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};
use serde_json::json;

/// Errors returned to the client as `{"message": ...}`
#[derive(Debug, Display, Error)]
pub enum ApiError {
    #[display("{_0}")]
    BadRequest(#[error(not(source))] String),
    #[display("{_0}")]
    Unauthorized(#[error(not(source))] String),
    #[display("{_0}")]
    Forbidden(#[error(not(source))] String),
    #[display("{_0}")]
    NotFound(#[error(not(source))] String),
    #[display("Internal server error")]
    InternalServerError(#[error(not(source))] String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let msg = e.to_string();

        match e {
            DomainError::Validation(_) | DomainError::IllegalTransition { .. } => {
                ApiError::BadRequest(msg)
            }
            DomainError::Unauthorized(_) => ApiError::Unauthorized(msg),
            DomainError::Forbidden(_) => ApiError::Forbidden(msg),
            DomainError::NotFound(_) => ApiError::NotFound(msg),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<DomainError>() {
            Ok(domain_error) => domain_error.into(),
            Err(e) => ApiError::InternalServerError(format!("{e:#}")),
        }
    }
}

impl web::error::WebResponseError for ApiError {
    fn error_response(&self, req: &web::HttpRequest) -> web::HttpResponse {
        if let ApiError::InternalServerError(details) = self {
            error!("[InternalServerError] {} {}: {details}", req.method(), req.path());
        }

        web::HttpResponse::build(self.status_code()).json(&json!({ "message": self.to_string() }))
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            ApiError::BadRequest(_) => http::StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => http::StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => http::StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
