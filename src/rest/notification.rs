use ntex::web;
use serde_json::json;

use crate::{
    api,
    rest::{AppState, errors::ApiError, middleware::auth_user::AuthUser},
};

#[web::get("")]
async fn get_notifications(
    AuthUser(user_id): AuthUser,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let notifications = api::notification::get_notifications(&app_state.repo, user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&notifications))
}

#[web::get("/unread-count")]
async fn get_unread_count(
    AuthUser(user_id): AuthUser,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let count = api::notification::get_unread_count(&app_state.repo, user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&json!({ "count": count })))
}

#[web::put("/read-all")]
async fn mark_all_as_read(
    AuthUser(user_id): AuthUser,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    api::notification::mark_all_as_read(&app_state.repo, user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&json!({ "message": "All notifications marked as read" })))
}

#[web::put("/{notification_id}/read")]
async fn mark_as_read(
    AuthUser(user_id): AuthUser,
    path: web::types::Path<(i64,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let notification = api::notification::mark_as_read(&app_state.repo, user_id, path.0)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&notification))
}

#[web::delete("/{notification_id}")]
async fn delete_notification(
    AuthUser(user_id): AuthUser,
    path: web::types::Path<(i64,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    api::notification::delete_notification(&app_state.repo, user_id, path.0)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&json!({ "message": "Notification deleted" })))
}
