use std::sync::Arc;

use error_model::FieldChecks;
use error_model::StructuredError;
use error_model::ValidationError;
use tonic::Status;
use user_proto::CreateUserRequest;
use user_proto::CreateUserResponse;

use super::role_from_proto;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::ValidationRules;
use crate::domain::user::ports::UserServicePort;

pub async fn create_one_user<S: UserServicePort>(
    service: Arc<S>,
    rules: &ValidationRules,
    request: CreateUserRequest,
) -> Result<CreateUserResponse, Status> {
    let command = validate(request, rules).map_err(to_status)?;

    let user = service.create_user(command).await.map_err(to_status)?;

    Ok(CreateUserResponse {
        id: user.id.to_string(),
    })
}

/// Fields are checked in declaration order: email, password, role.
fn validate(
    request: CreateUserRequest,
    rules: &ValidationRules,
) -> Result<CreateUserCommand, UserError> {
    let mut checks = FieldChecks::new();
    let email = checks.check("email", EmailAddress::new(request.email, rules));
    let password = checks.check("password", Password::new(request.password, rules));
    let role = checks.check("role", role_from_proto(request.role));
    checks.finish()?;

    match (email, password, role) {
        (Some(email), Some(password), Some(role)) => {
            Ok(CreateUserCommand::new(email, password, role))
        }
        _ => Err(ValidationError::Engine("field check yielded no value".to_string()).into()),
    }
}

fn to_status(error: UserError) -> Status {
    StructuredError::from(error).into()
}
