#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use api_gateway::config::UserServiceConfig;
use api_gateway::domain::user::models::Credentials;
use api_gateway::domain::user::models::NewUser;
use api_gateway::domain::user::models::SessionTokens;
use api_gateway::domain::user::ports::UserGateway;
use api_gateway::inbound::http::create_router;
use api_gateway::outbound::grpc::GrpcUserGateway;
use async_trait::async_trait;
use error_model::ErrorKind;
use error_model::FieldViolation;
use error_model::StructuredError;
use mockall::mock;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::Request;
use tonic::Response;
use tonic::Status;
use user_proto::user_service_server::UserService;
use user_proto::user_service_server::UserServiceServer;
use user_proto::CreateUserRequest;
use user_proto::CreateUserResponse;
use user_proto::LoginUserRequest;
use user_proto::LoginUserResponse;
use user_proto::RefreshTokenRequest;
use user_proto::RefreshTokenResponse;
use user_proto::UserRole;

pub const STUB_USER_ID: &str = "01890a5d-ac96-774b-bcce-b302099a8057";
pub const STUB_PASSWORD: &str = "pass_word!";
pub const STUB_REFRESH_TOKEN: &str = "stub-refresh-token";
pub const STUB_ACCESS_TOKEN: &str = "stub-access-token";
pub const TAKEN_EMAIL: &str = "taken@example.com";

mock! {
    pub TestUserGateway {}

    #[async_trait]
    impl UserGateway for TestUserGateway {
        async fn create_user(&self, new_user: NewUser) -> Result<String, StructuredError>;
        async fn login(&self, credentials: Credentials) -> Result<SessionTokens, StructuredError>;
        async fn refresh(&self, refresh_token: String) -> Result<String, StructuredError>;
    }
}

/// User service double answering with the same statuses the real one uses.
#[derive(Default)]
pub struct StubUserService {
    received_roles: Mutex<Vec<i32>>,
}

impl StubUserService {
    pub fn received_roles(&self) -> Vec<i32> {
        self.received_roles.lock().unwrap().clone()
    }
}

#[tonic::async_trait]
impl UserService for StubUserService {
    async fn create_one_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let req = request.into_inner();
        self.received_roles.lock().unwrap().push(req.role);

        let mut violations = Vec::new();
        if req.email.is_empty() {
            violations.push(FieldViolation::new("email", "is required"));
        }
        if req.password.chars().count() < 8 {
            violations.push(FieldViolation::new("password", "must be at least 8 characters"));
        }
        if matches!(
            UserRole::try_from(req.role),
            Ok(UserRole::Unspecified) | Err(_)
        ) {
            violations.push(FieldViolation::new("role", "invalid user role"));
        }
        if !violations.is_empty() {
            return Err(StructuredError::invalid_input("invalid input data", violations).into());
        }

        if req.email == TAKEN_EMAIL {
            return Err(StructuredError::new(ErrorKind::AlreadyExists, "email already exist").into());
        }

        Ok(Response::new(CreateUserResponse {
            id: STUB_USER_ID.to_string(),
        }))
    }

    async fn login_user(
        &self,
        request: Request<LoginUserRequest>,
    ) -> Result<Response<LoginUserResponse>, Status> {
        let req = request.into_inner();
        if req.password != STUB_PASSWORD {
            return Err(StructuredError::new(ErrorKind::Unauthenticated, "invalid credential").into());
        }

        Ok(Response::new(LoginUserResponse {
            access_token: STUB_ACCESS_TOKEN.to_string(),
            refresh_token: STUB_REFRESH_TOKEN.to_string(),
        }))
    }

    async fn refresh_token(
        &self,
        request: Request<RefreshTokenRequest>,
    ) -> Result<Response<RefreshTokenResponse>, Status> {
        if request.into_inner().refresh_token != STUB_REFRESH_TOKEN {
            return Err(StructuredError::new(ErrorKind::Unauthenticated, "invalid token").into());
        }

        Ok(Response::new(RefreshTokenResponse {
            access_token: STUB_ACCESS_TOKEN.to_string(),
        }))
    }
}

/// Test application that spawns a real HTTP server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the gateway in front of the given user gateway
    pub async fn spawn<G: UserGateway>(user_gateway: G) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let application = create_router(Arc::new(user_gateway));
        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    /// Spawn a stub user service over gRPC and the gateway in front of it
    pub async fn spawn_with_user_service() -> (Self, Arc<StubUserService>) {
        let grpc_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let grpc_port = grpc_listener.local_addr().unwrap().port();

        let stub = Arc::new(StubUserService::default());
        let service = Arc::clone(&stub);
        tokio::spawn(async move {
            Server::builder()
                .add_service(UserServiceServer::from_arc(service))
                .serve_with_incoming(TcpListenerStream::new(grpc_listener))
                .await
                .expect("gRPC server error");
        });

        let gateway = GrpcUserGateway::new(&UserServiceConfig {
            grpc_url: format!("http://127.0.0.1:{}", grpc_port),
            timeout_seconds: 5,
        })
        .expect("Failed to build user gateway");

        (Self::spawn(gateway).await, stub)
    }

    /// Spawn the gateway pointed at a port where nothing listens
    pub async fn spawn_with_unreachable_user_service() -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind port");
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let gateway = GrpcUserGateway::new(&UserServiceConfig {
            grpc_url: format!("http://127.0.0.1:{}", port),
            timeout_seconds: 2,
        })
        .expect("Failed to build user gateway");

        Self::spawn(gateway).await
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}
