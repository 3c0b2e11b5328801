//! Public booking data, no token needed

use ntex::web;

use crate::{api, rest::AppState};

#[web::get("/api/services")]
async fn get_services() -> Result<impl web::Responder, web::Error> {
    Ok(web::HttpResponse::Ok().json(&api::summary::get_catalog()))
}

#[web::get("/api/slots")]
async fn get_slots(app_state: web::types::State<AppState>) -> Result<impl web::Responder, web::Error> {
    let policy = &app_state.booking_policy;

    Ok(web::HttpResponse::Ok().json(&api::slots::get_slots(policy.today(), policy.window_days)))
}
