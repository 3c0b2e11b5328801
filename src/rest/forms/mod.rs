pub mod appointment;
pub mod pet;
pub mod user;
