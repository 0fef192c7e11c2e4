use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::user::ports::UserGateway;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CreateUserRequest;
use crate::inbound::http::handlers::CreateUserResponseData;
use crate::inbound::http::router::AppState;

pub async fn create_user<G: UserGateway>(
    State(state): State<AppState<G>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<ApiSuccess<CreateUserResponseData>, ApiError> {
    let id = state.user_gateway.create_user(req.into()).await?;

    tracing::info!(user_id = %id, "User registered");

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        CreateUserResponseData { id },
    ))
}
