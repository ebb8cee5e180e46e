use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a reservation field fails its constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FieldError {
    #[error("this field is required")]
    Required,
    #[error("must contain at least {min} characters")]
    TooShort { min: usize },
    #[error("phone number must be 8 to 15 characters of digits and spaces, optionally starting with '+'")]
    InvalidPhone,
    #[error("unknown budget bracket")]
    UnknownBudget,
}
