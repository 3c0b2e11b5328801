//! REST route configuration.
//!
//! Every resource gets its own scope under `/api`. Handlers needing a user
//! take the [AuthUser](super::middleware::auth_user::AuthUser) extractor, admin
//! handlers take [AdminUser](super::middleware::auth_user::AdminUser).

use super::{appointment, auth, catalog, notification, pet, photo, server};
use ntex::web;

/// # Routes
/// - `POST /api/auth/register`
/// - `POST /api/auth/login`
/// - `GET|PUT /api/auth/profile`
/// - `POST /api/auth/upload-profile-image`
pub fn auth(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/auth").service((
        auth::register,
        auth::login,
        auth::get_profile,
        auth::update_profile,
        auth::upload_profile_image,
    )));
}

pub fn pet(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/pets").service((
        pet::get_pets,
        pet::create_pet,
        pet::update_pet,
        pet::delete_pet,
    )));
}

/// Admin routes are registered before the `/{appointment_id}` ones
pub fn appointment(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/appointments").service((
        appointment::get_all_appointments,
        appointment::set_appointment_status,
        appointment::create_appointment,
        appointment::get_user_appointments,
        appointment::get_user_appointment,
        appointment::update_user_appointment,
        appointment::delete_user_appointment,
    )));
}

pub fn notification(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/notifications").service((
        notification::get_notifications,
        notification::get_unread_count,
        notification::mark_all_as_read,
        notification::mark_as_read,
        notification::delete_notification,
    )));
}

/// # Routes
/// - `GET /api/user/photos`
/// - `POST /api/user/photos` (also `/api/user/upload-photo`)
/// - `DELETE /api/user/photos/{photo_id}`
pub fn photo(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/user").service((
        photo::get_photos,
        photo::add_photo,
        photo::add_photo_legacy,
        photo::delete_photo,
    )));
}

pub fn catalog(cfg: &mut web::ServiceConfig) {
    cfg.service((catalog::get_services, catalog::get_slots));
}

/// All the api routes plus `/health`
pub fn api(cfg: &mut web::ServiceConfig) {
    auth(cfg);
    pet(cfg);
    appointment(cfg);
    notification(cfg);
    photo(cfg);
    catalog(cfg);
    cfg.service(server::health);
}
