//! CallConsole HTTP Server
//!
//! Actix-web REST API the console UI calls to summarize calls

mod routes;
mod state;
mod types;

#[cfg(test)]
mod test_support;

pub use state::AppState;

use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use callconsole_common::{AppConfig, Result};
use callconsole_llm::CallSummarizer;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

use crate::types::ErrorResponse;

/// An unreadable body carries no usable transcript
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected request body: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::new("Transcript unavailable"));
    InternalError::from_response(err, response).into()
}

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(routes::summaries::create_summary)
        .service(routes::models::get_models)
        .service(routes::system::health);
}

/// Build the summarizer from config and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    config.validate()?;

    let summarizer = CallSummarizer::from_config(&config)?;
    let bind_addr = config.server_bind_address();

    info!(
        "Summaries served by {} (model {}, timeout {:?})",
        summarizer.backend_name(),
        summarizer.model(),
        summarizer.timeout()
    );

    let state = Arc::new(AppState::new(config, summarizer));

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
