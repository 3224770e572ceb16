pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::documents::handlers as documents;
use crate::evaluation::handlers as evaluation;
use crate::interview::handlers as interview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let recording_limit = state.max_recording_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Documents
        .route("/api/v1/documents", post(documents::handle_store_document))
        .route(
            "/api/v1/documents/latest",
            get(documents::handle_latest_document),
        )
        // Stateless pipeline stages
        .route("/api/v1/analysis", post(analysis::handle_analyze))
        .route("/api/v1/resume/condense", post(evaluation::handle_condense))
        .route(
            "/api/v1/responses/evaluate",
            post(evaluation::handle_evaluate),
        )
        // Interview wizard
        .route("/api/v1/interview", get(interview::handle_snapshot))
        .route("/api/v1/interview/start", post(interview::handle_start))
        .route(
            "/api/v1/interview/documents",
            post(interview::handle_upload_documents),
        )
        .route(
            "/api/v1/interview/principle",
            post(interview::handle_select_principle),
        )
        .route("/api/v1/interview/feedback", post(interview::handle_feedback))
        .route("/api/v1/interview/next", post(interview::handle_next))
        .route("/api/v1/interview/reset", post(interview::handle_reset))
        .route(
            "/api/v1/interview/recordings",
            post(interview::handle_upload_recording)
                .layer(DefaultBodyLimit::max(recording_limit)),
        )
        .route(
            "/api/v1/interview/sessions/:id/responses",
            get(interview::handle_list_responses),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::test_support::{analysis_json, score_report_json, test_state};

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state(vec![]);
        let (status, body) = send(build_router(state), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_store_and_fetch_latest_document() {
        let (state, _) = test_state(vec![]);
        let app = build_router(state);

        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/v1/documents",
            Some(json!({"kind": "resume", "filename": "cv.txt", "content": "Senior PM"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["kind"], "resume");

        let (status, body) = send(app, "GET", "/api/v1/documents/latest?kind=resume", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "Senior PM");
        assert_eq!(body["filename"], "cv.txt");
    }

    #[tokio::test]
    async fn test_missing_document_is_404() {
        let (state, _) = test_state(vec![]);
        let (status, body) = send(
            build_router(state),
            "GET",
            "/api/v1/documents/latest?kind=job_description",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_analysis_validation_error_is_400() {
        let (state, llm) = test_state(vec![]);
        let (status, body) = send(
            build_router(state),
            "POST",
            "/api/v1/analysis",
            Some(json!({"resume_content": "Senior PM", "job_description_content": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_evaluate_malformed_reply_is_502() {
        let (state, _) = test_state(vec![Ok("not json".to_string())]);
        let (status, body) = send(
            build_router(state),
            "POST",
            "/api/v1/responses/evaluate",
            Some(json!({
                "question_text": "Tell me about...",
                "transcript": "I worked with a customer who...",
                "condensed_resume": "Senior PM",
                "job_description": "Seeking PM",
                "leadership_principle": "Customer Obsession"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MALFORMED_RESPONSE");
    }

    #[tokio::test]
    async fn test_condense_reports_stats() {
        let (state, _) = test_state(vec![Ok("Senior PM at Acme".to_string())]);
        let (status, body) = send(
            build_router(state),
            "POST",
            "/api/v1/resume/condense",
            Some(json!({
                "resume_text": "Senior PM at Acme, 2019 to 2023, plus a long list of hobbies",
                "question_text": "Tell me about a launch"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["condensed_resume"], "Senior PM at Acme");
        assert_eq!(body["condensed_words"], 4);
        assert_eq!(body["truncated"], false);
    }

    #[tokio::test]
    async fn test_interview_flow_over_http() {
        let (state, _) = test_state(vec![
            Ok(analysis_json()),
            Ok("Senior PM, grew revenue 40%".to_string()),
            Ok(score_report_json(82)),
        ]);
        let app = build_router(state);

        let (status, body) = send(app.clone(), "POST", "/api/v1/interview/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "uploading");

        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/v1/interview/documents",
            Some(json!({
                "resume": {"filename": "cv.txt", "content": "Senior PM, led 3 launches, grew revenue 40%..."},
                "job_description": {"filename": "jd.txt", "content": "Seeking PM with customer focus..."}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "principle_selection");
        assert_eq!(body["principles"][0]["title"], "Customer Obsession");

        let (_, body) = send(
            app.clone(),
            "POST",
            "/api/v1/interview/principle",
            Some(json!({})),
        )
        .await;
        assert_eq!(body["step"], "question");
        assert_eq!(body["index"], 0);

        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/v1/interview/feedback",
            Some(json!({"transcript": "I worked with a customer who..."})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "feedback");
        assert_eq!(body["results"][0]["report"]["overall"]["score"], 82);

        let session_id = body["session_id"].as_str().unwrap().to_string();
        let (status, body) = send(
            app,
            "GET",
            &format!("/api/v1/interview/sessions/{session_id}/responses"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["overall_score"], 82);
    }

    #[tokio::test]
    async fn test_wrong_step_is_409_invalid_transition() {
        let (state, _) = test_state(vec![]);
        let (status, body) = send(
            build_router(state),
            "POST",
            "/api/v1/interview/next",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "INVALID_TRANSITION");
    }

    #[tokio::test]
    async fn test_request_in_flight_is_409() {
        let (state, _) = test_state(vec![]);
        let _busy = state.interviews.try_acquire(state.owner_id).unwrap();
        let (status, body) = send(
            build_router(state.clone()),
            "POST",
            "/api/v1/interview/start",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "REQUEST_IN_FLIGHT");
    }

    #[tokio::test]
    async fn test_upload_recording_returns_reference() {
        let (state, _) = test_state(vec![]);
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/interview/recordings")
            .header("content-type", "audio/webm")
            .body(Body::from(vec![1u8, 2, 3, 4]))
            .unwrap();
        let response = build_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let reference = body["audio_reference"].as_str().unwrap();
        assert!(reference.starts_with("recordings/00000000-0000-0000-0000-000000000000/"));
    }

    fn recording_request(size: usize) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/interview/recordings")
            .header("content-type", "audio/webm")
            .body(Body::from(vec![7u8; size]))
            .unwrap()
    }

    #[tokio::test]
    async fn test_recording_above_default_body_limit_is_accepted() {
        let (state, _) = test_state(vec![]);
        let response = build_router(state)
            .oneshot(recording_request(3 * 1024 * 1024))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_recording_over_configured_limit_is_413() {
        let (mut state, _) = test_state(vec![]);
        state.max_recording_bytes = 1024;
        let response = build_router(state)
            .oneshot(recording_request(4096))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_empty_recording_is_400() {
        let (state, _) = test_state(vec![]);
        let (status, _) = send(
            build_router(state),
            "POST",
            "/api/v1/interview/recordings",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
