//! Handlers not linked to a specific resource

use ntex::web;
use serde_json::json;

use crate::rest::errors::ApiError;

#[web::get("/health")]
async fn health() -> Result<impl web::Responder, web::Error> {
    Ok(web::HttpResponse::Ok().json(&json!({ "status": "ok" })))
}

/// Return a [NotFound](ApiError::NotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(ApiError::NotFound("Route not found".into()).into())
}
