use actix_web::http::StatusCode;
use actix_web::{post, web, HttpResponse};
use callconsole_llm::SummaryRequest;
use tracing::{info, warn};
use tracing_actix_web::RequestId;

use crate::state::AppState;
use crate::types::ErrorResponse;

/// POST /summaries - Summarize one call transcript
///
/// The in-flight backend call is dropped if the client disconnects.
#[post("/summaries")]
pub async fn create_summary(
    req: web::Json<SummaryRequest>,
    request_id: RequestId,
    state: web::Data<std::sync::Arc<AppState>>,
) -> HttpResponse {
    match state.summarizer.summarize(&req).await {
        Ok(response) => {
            info!("Summary request {} completed", request_id);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            warn!("Summary request {} failed ({}): {}", request_id, e.kind(), e);
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).json(ErrorResponse::new(e.user_message()))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{state_with, FixedBackend};
    use actix_web::{test, web, App};
    use callconsole_llm::BackendError;
    use serde_json::{json, Value};
    use tracing_actix_web::TracingLogger;

    macro_rules! app_with {
        ($backend:expr) => {
            test::init_service(
                App::new()
                    .wrap(TracingLogger::default())
                    .app_data(web::Data::new(state_with($backend)))
                    .configure(crate::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_summary_success() {
        let backend = FixedBackend::replying(json!({
            "summary": "Caller reported a delayed order; AI confirmed it is out for delivery."
        }));
        let app = app_with!(backend.clone());

        let req = test::TestRequest::post()
            .uri("/summaries")
            .set_json(json!({ "transcript": "Caller: My order hasn't arrived.\nAI: ..." }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "summary": "Caller reported a delayed order; AI confirmed it is out for delivery." })
        );
        assert_eq!(backend.calls(), 1);
    }

    #[actix_web::test]
    async fn test_console_field_name_accepted() {
        let backend = FixedBackend::replying(json!({ "summary": "ok" }));
        let app = app_with!(backend);

        let req = test::TestRequest::post()
            .uri("/summaries")
            .set_json(json!({ "callTranscript": "Caller: hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn test_empty_transcript_is_unavailable() {
        let backend = FixedBackend::replying(json!({ "summary": "ok" }));
        let app = app_with!(backend.clone());

        for body in [json!({ "transcript": "" }), json!({})] {
            let req = test::TestRequest::post()
                .uri("/summaries")
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), 400);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "error": "Transcript unavailable" }));
        }
        assert_eq!(backend.calls(), 0);
    }

    #[actix_web::test]
    async fn test_schema_violation_hides_kind() {
        let backend = FixedBackend::replying(json!({}));
        let app = app_with!(backend);

        let req = test::TestRequest::post()
            .uri("/summaries")
            .set_json(json!({ "transcript": "Caller: hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 502);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Cannot generate summary" }));
    }

    #[actix_web::test]
    async fn test_backend_unavailable() {
        let backend = FixedBackend::failing(BackendError::Connection("refused".to_string()));
        let app = app_with!(backend);

        let req = test::TestRequest::post()
            .uri("/summaries")
            .set_json(json!({ "transcript": "Caller: hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 503);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Cannot generate summary");
    }

    #[actix_web::test]
    async fn test_null_transcript_is_unavailable() {
        let backend = FixedBackend::replying(json!({ "summary": "ok" }));
        let app = app_with!(backend.clone());

        let req = test::TestRequest::post()
            .uri("/summaries")
            .set_json(json!({ "transcript": null }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Transcript unavailable" }));
        assert_eq!(backend.calls(), 0);
    }

    #[actix_web::test]
    async fn test_unreadable_body_is_unavailable() {
        let backend = FixedBackend::replying(json!({ "summary": "ok" }));
        let app = app_with!(backend.clone());

        let malformed = test::TestRequest::post()
            .uri("/summaries")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let wrong_type = test::TestRequest::post()
            .uri("/summaries")
            .set_json(json!({ "transcript": 42 }))
            .to_request();

        for req in [malformed, wrong_type] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "error": "Transcript unavailable" }));
        }
        assert_eq!(backend.calls(), 0);
    }
}
