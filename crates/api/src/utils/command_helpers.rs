//! Command execution helpers
//!
//! Provides utilities to reduce boilerplate when implementing commands with
//! timing and logging.

use std::future::Future;
use std::time::Instant;

use sectorgrid_domain::Result as DomainResult;

use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command with automatic timing and logging
///
/// # Example
///
/// ```rust,ignore
/// pub async fn refresh_inventory(ctx: &AppContext) -> DomainResult<RefreshResponse> {
///     execute_logged("grid::refresh_inventory", "json", || async {
///         ctx.source.invalidate().await;
///         Ok(RefreshResponse { refreshed: true })
///     })
///     .await
/// }
/// ```
pub async fn execute_logged<F, Fut, T>(command: &str, surface: &str, f: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();
    let result = f().await;
    log_command_execution(command, surface, start.elapsed(), result.as_ref().err().map(error_label));
    result
}
