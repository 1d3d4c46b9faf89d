//! tabforge — a multimedia product content tab engine.
//!
//! Products carry an ordered collection of custom content tabs, each in one
//! of three layouts: rich text, an image/PDF resource grid, or embedded
//! videos. The crate covers the full path: rendering the admin builder
//! form, gating and sanitizing posted saves, persisting one JSON document
//! per product in SQLite, and publishing the tabs into a host page's tab
//! collection with canonical video embed URLs resolved at render time.

pub mod app;
pub mod database;
pub mod managers;
pub mod services;
pub mod types;
