use std::sync::Arc;

use error_model::FieldChecks;
use error_model::StructuredError;
use tonic::Status;
use user_proto::LoginUserRequest;
use user_proto::LoginUserResponse;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::UserServicePort;

pub async fn login_user<S: UserServicePort>(
    service: Arc<S>,
    request: LoginUserRequest,
) -> Result<LoginUserResponse, Status> {
    let mut checks = FieldChecks::new();
    checks.check("email", required(&request.email));
    checks.check("password", required(&request.password));
    checks
        .finish()
        .map_err(|e| Status::from(StructuredError::from(UserError::from(e))))?;

    let command = LoginCommand {
        email: request.email,
        password: request.password,
    };

    let tokens = service
        .login_user(command)
        .await
        .map_err(|e| Status::from(StructuredError::from(e)))?;

    Ok(LoginUserResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    })
}

fn required(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        Err("is required")
    } else {
        Ok(())
    }
}
