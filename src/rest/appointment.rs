use ntex::web;
use serde_json::json;

use crate::{
    api,
    rest::{
        AppState,
        errors::ApiError,
        forms::appointment::{AppointmentStatusForm, CreateAppointmentForm, UpdateAppointmentForm},
        middleware::auth_user::{AdminUser, AuthUser},
    },
};

#[web::post("")]
async fn create_appointment(
    AuthUser(user_id): AuthUser,
    form: web::types::Json<CreateAppointmentForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let appointment = api::appointment::create_appointment(
        &app_state.repo,
        &app_state.booking_policy,
        user_id,
        form.into_inner(),
    )
    .await
    .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Created().json(&appointment))
}

#[web::get("")]
async fn get_user_appointments(
    AuthUser(user_id): AuthUser,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let appointments = api::appointment::get_user_appointments(&app_state.repo, user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&appointments))
}

#[web::get("/{appointment_id}")]
async fn get_user_appointment(
    AuthUser(user_id): AuthUser,
    path: web::types::Path<(i64,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let appointment = api::appointment::get_user_appointment(&app_state.repo, user_id, path.0)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&appointment))
}

/// Owner update, only cancellation is allowed
#[web::put("/{appointment_id}")]
async fn update_user_appointment(
    AuthUser(user_id): AuthUser,
    path: web::types::Path<(i64,)>,
    form: web::types::Json<UpdateAppointmentForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let appointment = api::appointment::update_user_appointment(
        &app_state.repo,
        user_id,
        path.0,
        form.into_inner(),
    )
    .await
    .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&appointment))
}

#[web::delete("/{appointment_id}")]
async fn delete_user_appointment(
    AuthUser(user_id): AuthUser,
    path: web::types::Path<(i64,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    api::appointment::delete_user_appointment(&app_state.repo, user_id, path.0)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&json!({ "message": "Appointment deleted successfully" })))
}

#[web::get("/admin/all")]
async fn get_all_appointments(
    _: AdminUser,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let appointments = api::appointment::get_all_appointments(&app_state.repo)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&appointments))
}

#[web::put("/admin/{appointment_id}/status")]
async fn set_appointment_status(
    _: AdminUser,
    path: web::types::Path<(i64,)>,
    form: web::types::Json<AppointmentStatusForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let appointment = api::appointment::set_appointment_status(
        &app_state.repo,
        &app_state.booking_policy,
        path.0,
        form.into_inner(),
    )
    .await
    .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&appointment))
}
