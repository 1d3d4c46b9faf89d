//! Core data types for tabforge.

pub mod errors;
pub mod tab;
