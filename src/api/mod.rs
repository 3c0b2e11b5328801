//! # API Module
//!
//! Business logic of the HappyPaws backend. Handlers in [crate::rest] parse
//! the request and call into these modules, which return [anyhow::Result]
//! carrying an [errors::DomainError] for rule violations.
//!
//! ## Modules
//!
//! - [`appointment`] - Booking, cancellation and admin status changes
//! - [`errors`] - Domain error kinds
//! - [`lifecycle`] - Appointment status transition rules
//! - [`notification`] - Notification templates and read state
//! - [`pet`] - Pet management
//! - [`photo`] - User photo gallery
//! - [`reminder`] - Day-before appointment reminders
//! - [`slots`] - Bookable dates and time slots
//! - [`summary`] - Service catalog and price checks
//! - [`upload`] - Image validation and storage paths
//! - [`user`] - Registration, login and profile

pub mod appointment;
pub mod errors;
pub mod lifecycle;
pub mod notification;
pub mod pet;
pub mod photo;
pub mod reminder;
pub mod slots;
pub mod summary;
pub mod upload;
pub mod user;
