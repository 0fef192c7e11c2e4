use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::user::ports::UserGateway;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::LoginRequest;
use crate::inbound::http::handlers::LoginResponseData;
use crate::inbound::http::router::AppState;

pub async fn login<G: UserGateway>(
    State(state): State<AppState<G>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .user_gateway
        .login(req.into())
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}
