pub mod appointment;
pub mod auth;
pub mod catalog;
pub mod errors;
pub mod forms;
pub mod middleware;
pub mod notification;
pub mod pet;
pub mod photo;
pub mod routes;
pub mod server;
pub mod utils;

use crate::{api::appointment::BookingPolicy, repo, security::TokenSigner, services};
use std::time::Duration;

pub struct AppState {
    pub repo: repo::ImplAppRepo,
    pub storage_service: services::ImplStorageService,
    pub token_signer: TokenSigner,
    pub booking_policy: BookingPolicy,
    pub promotion_delay: Duration,
}
