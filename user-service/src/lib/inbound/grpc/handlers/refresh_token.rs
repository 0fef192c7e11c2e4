use std::sync::Arc;

use error_model::StructuredError;
use tonic::Status;
use user_proto::RefreshTokenRequest;
use user_proto::RefreshTokenResponse;

use crate::domain::user::ports::UserServicePort;

pub async fn refresh_token<S: UserServicePort>(
    service: Arc<S>,
    request: RefreshTokenRequest,
) -> Result<RefreshTokenResponse, Status> {
    let access_token = service
        .refresh_token(&request.refresh_token)
        .await
        .map_err(|e| Status::from(StructuredError::from(e)))?;

    Ok(RefreshTokenResponse { access_token })
}
