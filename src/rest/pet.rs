use ntex::web;
use serde_json::json;

use crate::{
    api, consts,
    rest::{AppState, errors::ApiError, forms::pet::PetForm, middleware::auth_user::AuthUser, utils},
};

/// Builds a [PetForm] from the text fields and the optional `profileImage`
async fn deserialize_pet_form(payload: ntex_multipart::Multipart) -> Result<PetForm, ApiError> {
    let mut form = PetForm::default();

    let pic = utils::read_multipart(payload, consts::PROFILE_IMAGE_FIELD, |name, value| {
        form.set_text_field(name, value)
    })
    .await?;
    form.profile_image = pic;

    Ok(form)
}

#[web::get("")]
async fn get_pets(
    AuthUser(user_id): AuthUser,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pets = api::pet::get_pets(&app_state.repo, user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&pets))
}

#[web::post("")]
async fn create_pet(
    AuthUser(user_id): AuthUser,
    payload: ntex_multipart::Multipart,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let form = deserialize_pet_form(payload).await?;

    let pet = api::pet::create_pet(&app_state.repo, &app_state.storage_service, user_id, form)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Created().json(&pet))
}

#[web::put("/{pet_id}")]
async fn update_pet(
    AuthUser(user_id): AuthUser,
    path: web::types::Path<(i64,)>,
    payload: ntex_multipart::Multipart,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let form = deserialize_pet_form(payload).await?;

    let pet = api::pet::update_pet(
        &app_state.repo,
        &app_state.storage_service,
        user_id,
        path.0,
        form,
    )
    .await
    .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&pet))
}

#[web::delete("/{pet_id}")]
async fn delete_pet(
    AuthUser(user_id): AuthUser,
    path: web::types::Path<(i64,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    api::pet::delete_pet(&app_state.repo, &app_state.storage_service, user_id, path.0)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&json!({ "message": "Pet deleted successfully" })))
}
