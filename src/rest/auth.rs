use ntex::web;

use crate::{
    api, consts,
    rest::{AppState, errors::ApiError, forms, middleware::auth_user::AuthUser, utils},
};

#[web::post("/register")]
async fn register(
    form: web::types::Json<forms::user::RegisterForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let auth = api::user::register(
        &app_state.repo,
        &app_state.token_signer,
        form.into_inner(),
        app_state.promotion_delay,
    )
    .await
    .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Created().json(&auth))
}

#[web::post("/login")]
async fn login(
    form: web::types::Json<forms::user::LoginForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let auth = api::user::login(&app_state.repo, &app_state.token_signer, form.into_inner())
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&auth))
}

#[web::get("/profile")]
async fn get_profile(
    AuthUser(user_id): AuthUser,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user = api::user::get_profile(&app_state.repo, user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&user))
}

#[web::put("/profile")]
async fn update_profile(
    AuthUser(user_id): AuthUser,
    form: web::types::Json<forms::user::UpdateProfileForm>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user = api::user::update_profile(&app_state.repo, user_id, form.into_inner())
        .await
        .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&user))
}

/// Multipart request with the picture in `profileImage`
#[web::post("/upload-profile-image")]
async fn upload_profile_image(
    AuthUser(user_id): AuthUser,
    payload: ntex_multipart::Multipart,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pic = utils::read_multipart(payload, consts::PROFILE_IMAGE_FIELD, |_, _| {})
        .await
        .map_err(ApiError::from)?;

    let user =
        api::user::upload_profile_image(&app_state.repo, &app_state.storage_service, user_id, pic)
            .await
            .map_err(ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&user))
}
