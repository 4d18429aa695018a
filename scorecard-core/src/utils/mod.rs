//! Shared helpers

pub mod datetime;
