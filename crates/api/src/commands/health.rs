//! Health check command

use crate::context::AppContext;
use crate::utils::health::HealthStatus;

/// Get application health status
///
/// Runs a connectivity check against the inventory source and reports the
/// snapshot cache and session store alongside it.
///
/// # Example Response
/// ```json
/// {
///   "is_healthy": true,
///   "score": 1.0,
///   "message": null,
///   "components": [
///     { "name": "inventory_source", "is_healthy": true, "message": null },
///     { "name": "snapshot_cache", "is_healthy": true, "message": "warm" },
///     { "name": "sessions", "is_healthy": true, "message": "2 active" }
///   ],
///   "timestamp": 1698765432
/// }
/// ```
pub async fn get_app_health(ctx: &AppContext) -> HealthStatus {
    ctx.health_check().await
}
