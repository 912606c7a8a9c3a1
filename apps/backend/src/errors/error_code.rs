//! Error codes for the point draw API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the point draw API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General validation error
    ValidationError,
    /// Missing or malformed X-User-Id header
    InvalidUserId,
    /// Invalid round id in the path
    InvalidRoundId,
    /// Invalid page/limit
    InvalidPagination,
    /// General bad request error
    BadRequest,

    // Phase
    /// Operation attempted outside the entry window
    PhaseMismatch,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Round not found
    RoundNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// User already entered the current round
    AlreadyEntered,
    /// Lost a round-creation race
    RoundConflict,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    /// Data corruption detected
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::InvalidRoundId => "INVALID_ROUND_ID",
            Self::InvalidPagination => "INVALID_PAGINATION",
            Self::BadRequest => "BAD_REQUEST",

            Self::PhaseMismatch => "PHASE_MISMATCH",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyEntered => "ALREADY_ENTERED",
            Self::RoundConflict => "ROUND_CONFLICT",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
