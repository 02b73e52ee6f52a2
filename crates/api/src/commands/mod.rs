//! Commands - the logic behind each route
//!
//! Every command takes the shared [`AppContext`](crate::context::AppContext),
//! returns a domain `Result`, and is logged through
//! [`execute_logged`](crate::utils::command_helpers::execute_logged).

mod grid;
mod health;
mod selection;

pub use grid::*;
pub use health::*;
pub use selection::*;
