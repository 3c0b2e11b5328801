//! Appointment status transitions and who may trigger them.

use crate::{api::errors::DomainError, models::appointment::AppointmentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Owner,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The requested status is already the current one
    Unchanged,
    Changed {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}

/// Owners may only cancel, from any status. Admins may set any status,
/// unless `enforce_table` restricts them to [AppointmentStatus::allowed_next].
pub fn authorize_transition(
    actor: Actor,
    current: AppointmentStatus,
    requested: AppointmentStatus,
    enforce_table: bool,
) -> Result<Transition, DomainError> {
    match actor {
        Actor::Owner if requested != AppointmentStatus::Cancelled => Err(DomainError::Forbidden(
            "You can only cancel appointments".into(),
        )),
        _ if current == requested => Ok(Transition::Unchanged),
        Actor::Admin if enforce_table && !current.allowed_next().contains(&requested) => {
            Err(DomainError::IllegalTransition {
                from: current,
                to: requested,
            })
        }
        Actor::Owner | Actor::Admin => Ok(Transition::Changed {
            from: current,
            to: requested,
        }),
    }
}
