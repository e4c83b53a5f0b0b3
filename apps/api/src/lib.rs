//! Taskhub API application
//!
//! Wires configuration, database, migrations, and the domain routers
//! into a single HTTP server binary.

pub mod api;
pub mod config;
pub mod openapi;
