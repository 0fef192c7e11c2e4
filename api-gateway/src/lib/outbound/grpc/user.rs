use anyhow::Error;
use async_trait::async_trait;
use error_model::ErrorKind;
use error_model::StructuredError;
use tonic::transport::Channel;
use tonic::transport::Endpoint;
use tonic::Status;
use user_proto::user_service_client::UserServiceClient;
use user_proto::CreateUserRequest;
use user_proto::LoginUserRequest;
use user_proto::RefreshTokenRequest;
use user_proto::UserRole;

use crate::config::UserServiceConfig;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SessionTokens;
use crate::domain::user::ports::UserGateway;

const ROLE_PREFIX: &str = "USER_ROLE_";

pub struct GrpcUserGateway {
    client: UserServiceClient<Channel>,
}

impl GrpcUserGateway {
    /// Build a client for the configured user service.
    ///
    /// The connection is established on first use, so the gateway can start
    /// before the user service is reachable.
    ///
    /// # Errors
    /// Returns error if the configured URL is not a valid endpoint
    pub fn new(config: &UserServiceConfig) -> Result<Self, Error> {
        let channel = Endpoint::from_shared(config.grpc_url.clone())?
            .timeout(config.timeout())
            .connect_lazy();

        Ok(Self::from_channel(channel))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: UserServiceClient::new(channel),
        }
    }
}

/// Wire role for a role name given by an HTTP client.
///
/// Accepts the plain name (`"teacher"`) or the wire name
/// (`"USER_ROLE_TEACHER"`). Anything else is sent as `Unspecified` and
/// reported back by the user service as a `role` violation.
pub fn wire_role(role: Option<&str>) -> UserRole {
    let Some(role) = role.map(str::trim) else {
        return UserRole::Unspecified;
    };

    let upper = role.to_ascii_uppercase();
    UserRole::from_str_name(&upper)
        .or_else(|| UserRole::from_str_name(&format!("{ROLE_PREFIX}{upper}")))
        .unwrap_or(UserRole::Unspecified)
}

/// Decode a status from the user service.
///
/// Transport failures (unavailable, deadline exceeded, cancelled) have no
/// entry in the code table and surface as `Internal`; their text is logged,
/// not returned.
fn decode_status(status: Status) -> StructuredError {
    let error = error_model::from_status(&status);
    if error.kind() == ErrorKind::Internal {
        return StructuredError::internal(format!(
            "user service call failed with {:?}: {}",
            status.code(),
            status.message()
        ));
    }

    tracing::debug!(kind = %error.kind(), message = %error.message(), "User service rejected call");
    error
}

#[async_trait]
impl UserGateway for GrpcUserGateway {
    async fn create_user(&self, new_user: NewUser) -> Result<String, StructuredError> {
        let request = tonic::Request::new(CreateUserRequest {
            role: wire_role(new_user.role.as_deref()) as i32,
            email: new_user.email,
            password: new_user.password,
        });

        let mut client = self.client.clone();
        let response = client
            .create_one_user(request)
            .await
            .map_err(decode_status)?;

        Ok(response.into_inner().id)
    }

    async fn login(&self, credentials: Credentials) -> Result<SessionTokens, StructuredError> {
        let request = tonic::Request::new(LoginUserRequest {
            email: credentials.email,
            password: credentials.password,
        });

        let mut client = self.client.clone();
        let response = client
            .login_user(request)
            .await
            .map_err(decode_status)?
            .into_inner();

        Ok(SessionTokens {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: String) -> Result<String, StructuredError> {
        let request = tonic::Request::new(RefreshTokenRequest { refresh_token });

        let mut client = self.client.clone();
        let response = client
            .refresh_token(request)
            .await
            .map_err(decode_status)?;

        Ok(response.into_inner().access_token)
    }
}
