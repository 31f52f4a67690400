//! Utility helpers

pub mod datetime;
