//! Shared helpers for the point draw backend's integration tests:
//! one-time logging bootstrap and Problem Details response assertions.

pub mod logging;
pub mod problem_details;
