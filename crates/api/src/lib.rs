//! # SectorGrid App
//!
//! HTTP application layer - commands, routes and main entry point.
//!
//! This crate contains:
//! - Commands (request handlers' logic, logged uniformly)
//! - Application context (dependency injection) and per-session selection
//! - The axum router serving the grid as JSON and as an HTML tile page
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Owns no business rules

pub mod commands;
pub mod context;
pub mod http;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
pub use http::router;
