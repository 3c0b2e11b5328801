use ntex::web;
use serde_json::json;

use crate::{
    api, consts,
    rest::{AppState, errors::ApiError, middleware::auth_user::AuthUser, utils},
};

#[web::get("/photos")]
async fn get_photos(
    AuthUser(user_id): AuthUser,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let photos = api::photo::get_photos(&app_state.repo, user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&photos))
}

async fn upload_photo(
    user_id: i64,
    payload: ntex_multipart::Multipart,
    app_state: &AppState,
) -> Result<web::HttpResponse, web::Error> {
    let pic = utils::read_multipart(payload, consts::GALLERY_IMAGE_FIELD, |_, _| {})
        .await
        .map_err(ApiError::from)?;

    let photo = api::photo::add_photo(&app_state.repo, &app_state.storage_service, user_id, pic)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Created().json(&photo))
}

/// Multipart request with the picture in `image`
#[web::post("/photos")]
async fn add_photo(
    AuthUser(user_id): AuthUser,
    payload: ntex_multipart::Multipart,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    upload_photo(user_id, payload, &app_state).await
}

/// Same as [add_photo], kept for older clients
#[web::post("/upload-photo")]
async fn add_photo_legacy(
    AuthUser(user_id): AuthUser,
    payload: ntex_multipart::Multipart,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    upload_photo(user_id, payload, &app_state).await
}

#[web::delete("/photos/{photo_id}")]
async fn delete_photo(
    AuthUser(user_id): AuthUser,
    path: web::types::Path<(i64,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    api::photo::delete_photo(&app_state.repo, &app_state.storage_service, user_id, path.0)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&json!({ "message": "Photo deleted successfully" })))
}
