use crate::models::appointment::AppointmentStatus;
use derive_more::{Display, Error};

/// Business rule violations. They travel inside [anyhow::Error] and are
/// mapped to a status code at the http boundary.
#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum DomainError {
    #[display("{_0}")]
    Validation(#[error(not(source))] String),
    #[display("{_0}")]
    Unauthorized(#[error(not(source))] String),
    #[display("{_0}")]
    Forbidden(#[error(not(source))] String),
    #[display("{_0}")]
    NotFound(#[error(not(source))] String),
    #[display("Cannot change status from {from} to {to}")]
    IllegalTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}

impl DomainError {
    pub fn validation(msg: &str) -> Self {
        DomainError::Validation(msg.to_string())
    }

    pub fn not_found(msg: &str) -> Self {
        DomainError::NotFound(msg.to_string())
    }
}
