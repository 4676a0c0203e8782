//! Domain services.

pub mod registration;

pub use registration::{validate, validate_at, RegistrationError};
