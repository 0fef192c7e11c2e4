use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::post;
use axum::Router;
use error_model::ErrorKind;
use error_model::StructuredError;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user;
use super::handlers::login;
use super::handlers::refresh;
use super::handlers::ApiError;
use crate::domain::user::ports::UserGateway;

pub struct AppState<G: UserGateway> {
    pub user_gateway: Arc<G>,
}

impl<G: UserGateway> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            user_gateway: Arc::clone(&self.user_gateway),
        }
    }
}

async fn route_not_found() -> ApiError {
    ApiError(StructuredError::new(ErrorKind::NotFound, "route not found"))
}

pub fn create_router<G: UserGateway>(user_gateway: Arc<G>) -> Router {
    let state = AppState { user_gateway };

    let public_routes = Router::new()
        .route("/api/v1/users", post(create_user::<G>))
        .route("/api/v1/auth/login", post(login::<G>))
        .route("/api/v1/auth/refresh", post(refresh::<G>));

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
        .merge(public_routes)
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .map_response(|response: Response<_>| response.map(Body::new))
                .layer(trace_layer),
        )
        .with_state(state)
}
