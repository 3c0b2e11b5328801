pub mod appointment;
pub mod notification;
pub mod pet;
pub mod user_app;

/// Uploaded image kept in memory until it is written to storage
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Pic {
    pub body: Vec<u8>,
    pub filename_extension: String,
}
