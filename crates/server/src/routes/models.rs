use actix_web::{get, web, HttpResponse};
use callconsole_common::available_ai_models;

use crate::state::AppState;
use crate::types::{BackendInfo, ModelsResponse};

/// GET /models - AI model catalog and the configured default
#[get("/models")]
pub async fn get_models(state: web::Data<std::sync::Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(ModelsResponse {
        models: available_ai_models(),
        default: state.config.default_ai_model.clone(),
        summarization: BackendInfo {
            name: state.summarizer.backend_name().to_string(),
            model: state.summarizer.model().to_string(),
        },
    })
}
