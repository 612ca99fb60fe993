//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Workflow endpoints are mounted under `/api/v1` and require a bearer
//! token; `/health` is public.

pub mod auth;
pub mod dto;
pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the full application: REST, WebSocket, docs, and middleware.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    let router = Router::new()
        .merge(build_router())
        .route("/ws", get(ws_handler));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi as _;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::domain::{EventBus, Role, SessionContext};
    use crate::persistence::MemoryStore;
    use crate::service::{AttendanceService, IssuancePolicy};

    fn app() -> Router {
        let service = AttendanceService::new(
            Arc::new(MemoryStore::new()),
            EventBus::new(64),
            IssuancePolicy::default(),
        );
        build_app(AppState::new(service), Duration::from_secs(5))
    }

    fn bearer(role: Role) -> String {
        let token = SessionContext::new("tester", "tester@example.com", role).to_token();
        format!("Bearer {token}")
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(Role::Admin))
            .header(header::CONTENT_TYPE, "application/json");
        let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
        let Ok(request) = builder.body(body) else {
            panic!("request should build");
        };
        let Ok(response) = app.clone().oneshot(request).await else {
            panic!("router is infallible");
        };
        let status = response.status();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should read");
        };
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    async fn create_event(app: &Router) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/events",
            Some(serde_json::json!({
                "name": "Spring Workshop",
                "eventDate": "2025-03-14",
                "startTime": "09:00:00",
                "endTime": "17:00:00",
                "location": "Hall A"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let Some(id) = body.get("id").and_then(|v| v.as_str()) else {
            panic!("event id missing: {body}");
        };
        id.to_string()
    }

    async fn register(app: &Router, event_id: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            &format!("/api/v1/events/{event_id}/attendees"),
            Some(serde_json::json!({"firstName": "Jane", "lastName": "Doe"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let Some(id) = body.get("id").and_then(|v| v.as_str()) else {
            panic!("attendee id missing: {body}");
        };
        id.to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let Ok(request) = Request::builder().uri("/health").body(Body::empty()) else {
            panic!("request should build");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let Ok(request) = Request::builder().uri("/api/v1/me").body(Body::empty()) else {
            panic!("request should build");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn generate_with_empty_attendee_is_bad_request() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/certificates/generate",
            Some(serde_json::json!({"attendeeId": "", "eventId": "e1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing attendeeId or eventId");
        assert_eq!(body["code"], 1001);
    }

    #[tokio::test]
    async fn generate_for_unknown_attendee_is_not_found() {
        let app = app();
        let event_id = create_event(&app).await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/certificates/generate",
            Some(serde_json::json!({
                "attendeeId": uuid::Uuid::new_v4().to_string(),
                "eventId": event_id,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Attendee not found");
    }

    #[tokio::test]
    async fn unknown_attendee_is_reported_before_malformed_event() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/certificates/generate",
            Some(serde_json::json!({
                "attendeeId": uuid::Uuid::new_v4().to_string(),
                "eventId": "e1",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Attendee not found");
        assert_eq!(body["code"], 2001);

        let event_id = create_event(&app).await;
        let attendee_id = register(&app, &event_id).await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/certificates/generate",
            Some(serde_json::json!({"attendeeId": attendee_id, "eventId": "e1"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Event not found");
    }

    #[tokio::test]
    async fn generate_for_attendee_of_another_event_is_not_found() {
        let app = app();
        let first = create_event(&app).await;
        let second = create_event(&app).await;
        let attendee_id = register(&app, &first).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/certificates/generate",
            Some(serde_json::json!({"attendeeId": attendee_id, "eventId": second})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Attendee not found");
    }

    #[tokio::test]
    async fn malformed_body_gets_error_envelope() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/certificates/generate",
            Some(serde_json::json!({"attendeeId": 5, "eventId": "e1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 1001);
        assert!(body["error"].is_string());

        let Ok(request) = Request::builder()
            .method("POST")
            .uri("/api/v1/certificates/generate")
            .header(header::AUTHORIZATION, bearer(Role::User))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
        else {
            panic!("request should build");
        };
        let Ok(response) = app.clone().oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should read");
        };
        let Ok(body) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
            panic!("error body should be json");
        };
        assert_eq!(body["code"], 1001);
    }

    #[tokio::test]
    async fn issuance_replay_returns_same_number() {
        let app = app();
        let event_id = create_event(&app).await;
        let attendee_id = register(&app, &event_id).await;
        let request = serde_json::json!({"attendeeId": attendee_id, "eventId": event_id});

        let (first_status, first) = send(
            &app,
            "POST",
            "/api/v1/certificates/generate",
            Some(request.clone()),
        )
        .await;
        let (second_status, second) =
            send(&app, "POST", "/api/v1/certificates/generate", Some(request)).await;

        assert_eq!(first_status, StatusCode::OK);
        assert_eq!(second_status, StatusCode::OK);
        assert_eq!(
            first["certificate"]["certificateNumber"],
            second["certificate"]["certificateNumber"]
        );
        assert_eq!(first["certificate"]["attendeeName"], "Jane Doe");
        assert_eq!(first["certificate"]["eventName"], "Spring Workshop");
    }

    #[tokio::test]
    async fn svg_download_sets_headers() {
        let app = app();
        let event_id = create_event(&app).await;
        let attendee_id = register(&app, &event_id).await;
        let (_, issued) = send(
            &app,
            "POST",
            "/api/v1/certificates/generate",
            Some(serde_json::json!({"attendeeId": attendee_id, "eventId": event_id})),
        )
        .await;
        let (Some(cert_id), Some(number)) = (
            issued["certificate"]["id"].as_str(),
            issued["certificate"]["certificateNumber"].as_str(),
        ) else {
            panic!("certificate missing: {issued}");
        };

        let Ok(request) = Request::builder()
            .uri(format!("/api/v1/certificates/{cert_id}/svg"))
            .header(header::AUTHORIZATION, bearer(Role::User))
            .body(Body::empty())
        else {
            panic!("request should build");
        };
        let Ok(response) = app.clone().oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("image/svg+xml")
        );
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert_eq!(disposition, format!("attachment; filename=\"{number}.svg\""));
    }

    #[tokio::test]
    async fn non_uuid_event_is_not_found() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/v1/events/e1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Event not found");
    }

    #[tokio::test]
    async fn registration_without_last_name_is_rejected() {
        let app = app();
        let event_id = create_event(&app).await;
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/events/{event_id}/attendees"),
            Some(serde_json::json!({"firstName": "Jane"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, list) = send(
            &app,
            "GET",
            &format!("/api/v1/events/{event_id}/attendees"),
            None,
        )
        .await;
        assert_eq!(list["data"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn non_admin_cannot_create_events() {
        let Ok(request) = Request::builder()
            .method("POST")
            .uri("/api/v1/events")
            .header(header::AUTHORIZATION, bearer(Role::User))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({
                    "name": "X",
                    "eventDate": "2025-03-14",
                    "startTime": "09:00:00",
                    "endTime": "10:00:00"
                })
                .to_string(),
            ))
        else {
            panic!("request should build");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
