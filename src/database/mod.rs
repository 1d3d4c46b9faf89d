//! Database layer: connection management and schema migrations.

pub mod connection;
pub mod migrations;
