use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use tracing::warn;

use crate::state::AppState;
use crate::types::{BackendInfo, HealthResponse};

/// GET /health - Server liveness plus backend reachability
#[get("/health")]
pub async fn health(state: web::Data<std::sync::Arc<AppState>>) -> HttpResponse {
    let reachable = state.summarizer.test_connection().await;
    if !reachable {
        warn!("Summarization backend {} is not reachable", state.summarizer.backend_name());
    }

    HttpResponse::Ok().json(HealthResponse {
        status: if reachable { "ok" } else { "degraded" }.to_string(),
        backend: BackendInfo {
            name: state.summarizer.backend_name().to_string(),
            model: state.summarizer.model().to_string(),
        },
        backend_reachable: reachable,
        timestamp: Utc::now(),
    })
}
