use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::user::ports::UserGateway;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::RefreshRequest;
use crate::inbound::http::handlers::RefreshResponseData;
use crate::inbound::http::router::AppState;

pub async fn refresh<G: UserGateway>(
    State(state): State<AppState<G>>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    state
        .user_gateway
        .refresh(req.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|access_token| ApiSuccess::new(StatusCode::OK, RefreshResponseData { access_token }))
}
