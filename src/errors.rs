use thiserror::Error;

/// Failures surfaced by habit lookups and progress queries.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HabitError {
    #[error("habit not found")]
    NotFound,

    #[error("start date must be on or before end date")]
    InvalidRange,
}

/// Failures surfaced by account operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    #[error("a user with this email already exists")]
    EmailTaken,

    #[error("user not found")]
    NotFound,
}
