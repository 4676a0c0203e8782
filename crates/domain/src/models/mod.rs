//! Domain models.

pub mod registration;

pub use registration::{
    Affiliation, Attendance, RegistrationRecord, RegistrationSubmission, CSV_HEADER,
};
