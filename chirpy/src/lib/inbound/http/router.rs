use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin::metrics;
use super::handlers::admin::reset;
use super::handlers::create_user::create_user;
use super::handlers::health::health_check;
use super::handlers::login::login;
use super::handlers::refresh::refresh;
use super::handlers::revoke::revoke;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use super::middleware::count_hits;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::metrics::HitCounter;
use crate::domain::session::ports::SessionServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub hits: Arc<HitCounter>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    session_service: Arc<dyn SessionServicePort>,
    hits: Arc<HitCounter>,
) -> Router {
    let state = AppState {
        account_service,
        session_service,
        hits,
    };

    let public_routes = Router::new()
        .route("/api/healthz", get(health_check))
        .route("/api/users", post(create_user))
        .route("/api/login", post(login))
        .route("/api/refresh", post(refresh))
        .route("/api/revoke", post(revoke));

    let protected_routes = Router::new()
        .route("/api/users", put(update_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(state.clone(), count_hits));

    let admin_routes = Router::new()
        .route("/admin/metrics", get(metrics))
        .route("/admin/reset", post(reset));

    // Authorization headers are bearer credentials; keep them out of the span.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(api_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::Authenticator;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::account::service::AccountService;
    use crate::domain::platform::Platform;
    use crate::domain::session::service::SessionService;
    use crate::outbound::repositories::InMemoryRefreshTokenRepository;
    use crate::outbound::repositories::InMemoryUserRepository;

    fn router(hits: Arc<HitCounter>) -> Router {
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(InMemoryRefreshTokenRepository::new());
        let authenticator = Arc::new(Authenticator::new(b"router-test-secret"));

        create_router(
            Arc::new(AccountService::new(Arc::clone(&users))),
            Arc::new(SessionService::new(
                users,
                tokens,
                authenticator,
                Platform::Production,
            )),
            hits,
        )
    }

    fn request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_requests_are_counted() {
        let hits = Arc::new(HitCounter::new());

        let response = router(Arc::clone(&hits))
            .oneshot(request("GET", "/api/healthz"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"OK");
        assert_eq!(hits.count(), 1);
    }

    #[tokio::test]
    async fn test_admin_requests_are_not_counted() {
        let hits = Arc::new(HitCounter::new());

        let response = router(Arc::clone(&hits))
            .oneshot(request("GET", "/admin/metrics"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.count(), 0);
    }

    #[tokio::test]
    async fn test_protected_route_rejects_anonymous() {
        let response = router(Arc::new(HitCounter::new()))
            .oneshot(request("PUT", "/api/users"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_reset_forbidden_outside_dev() {
        let response = router(Arc::new(HitCounter::new()))
            .oneshot(request("POST", "/admin/reset"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
