use crate::services::dispatch::DispatchService;
use crate::services::health_service::HealthService;
use crate::services::registration_service::RegistrationService;
use axum::body::Body;
use axum::http::Request;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod health;
pub mod middleware;
pub mod notifications;
pub mod push_tokens;
pub mod schemas;

#[derive(Clone, Debug)]
pub struct AppState {
    pub registration_service: RegistrationService,
    pub dispatch_service: DispatchService,
}

#[derive(Clone, Debug)]
pub struct MgmtState {
    pub health_service: HealthService,
}

#[derive(Debug)]
pub struct ServiceContainer {
    pub registration_service: RegistrationService,
    pub dispatch_service: DispatchService,
}

/// Configures and returns the primary application router.
pub fn app_router(services: ServiceContainer) -> Router {
    let state = AppState {
        registration_service: services.registration_service,
        dispatch_service: services.dispatch_service,
    };

    let api_routes = Router::new()
        .route("/tokens", post(push_tokens::register_token).delete(push_tokens::unregister_token))
        .route("/users/{userId}/devices", get(push_tokens::list_devices))
        .route("/notifications", post(notifications::send_to_user))
        .route("/notifications/bulk", post(notifications::send_to_users));

    Router::new()
        .nest("/v1", api_routes)
        .layer(PropagateRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                        "otel.kind" = "server",
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        let status = response.status();
                        tracing::Span::current().record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(
            axum::http::HeaderName::from_static("x-request-id"),
            middleware::MakeRequestUuidOrHeader,
        ))
        .with_state(state)
}

pub fn mgmt_router(state: MgmtState) -> Router {
    Router::new().route("/livez", get(health::livez)).route("/readyz", get(health::readyz)).with_state(state)
}
