//! Stateful components owning persistence concerns.

pub mod save_pipeline;
pub mod tab_store;
