use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;
use user_proto::user_service_server::UserService as UserServiceProto;
use user_proto::CreateUserRequest;
use user_proto::CreateUserResponse;
use user_proto::LoginUserRequest;
use user_proto::LoginUserResponse;
use user_proto::RefreshTokenRequest;
use user_proto::RefreshTokenResponse;

use super::handlers::create_one_user;
use super::handlers::login_user;
use super::handlers::refresh_token;
use crate::domain::user::models::ValidationRules;
use crate::domain::user::ports::UserServicePort;

pub struct UserGrpcService<S: UserServicePort> {
    service: Arc<S>,
    rules: ValidationRules,
}

impl<S: UserServicePort> UserGrpcService<S> {
    pub fn new(service: Arc<S>, rules: ValidationRules) -> Self {
        Self { service, rules }
    }
}

#[tonic::async_trait]
impl<S: UserServicePort> UserServiceProto for UserGrpcService<S> {
    async fn create_one_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let response = create_one_user::create_one_user(
            self.service.clone(),
            &self.rules,
            request.into_inner(),
        )
        .await?;
        Ok(Response::new(response))
    }

    async fn login_user(
        &self,
        request: Request<LoginUserRequest>,
    ) -> Result<Response<LoginUserResponse>, Status> {
        let response = login_user::login_user(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn refresh_token(
        &self,
        request: Request<RefreshTokenRequest>,
    ) -> Result<Response<RefreshTokenResponse>, Status> {
        let response =
            refresh_token::refresh_token(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
