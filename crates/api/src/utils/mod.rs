//! Shared helpers for commands and routes

pub mod command_helpers;
pub mod health;
pub mod logging;
