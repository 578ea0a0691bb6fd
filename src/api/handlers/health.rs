//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: Offline cache configured but not active
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "offline": {
///       "status": "ok",
///       "message": "cache-1718000000000 activated, 42 assets"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let offline_check = check_offline(&state).await;

    let all_healthy = offline_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            offline: offline_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks that the offline worker, if configured, is intercepting requests.
async fn check_offline(state: &AppState) -> CheckStatus {
    let Some(worker) = &state.offline else {
        return CheckStatus {
            status: "ok".to_string(),
            message: Some("Offline cache disabled".to_string()),
        };
    };

    let worker_state = worker.state().await;
    let config = worker.config();

    if worker_state.can_intercept_fetch() {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "{} {}, {} assets",
                config.cache_name(),
                worker_state,
                config.asset_count()
            )),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some(format!("{} {}", config.cache_name(), worker_state)),
        }
    }
}
