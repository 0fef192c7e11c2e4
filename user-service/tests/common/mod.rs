use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::CostParams;
use auth::JwtHandler;
use auth::PasswordHasher;
use auth::SigningSecret;
use auth::TokenSettings;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;
use user_proto::user_service_client::UserServiceClient;
use user_proto::user_service_server::UserServiceServer;
use user_service::domain::user::errors::UserError;
use user_service::domain::user::models::Credential;
use user_service::domain::user::models::User;
use user_service::domain::user::models::ValidationRules;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::service::UserService;
use user_service::inbound::grpc::UserGrpcService;

const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Repository double keeping users in memory, with the same uniqueness rule as Postgres.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Credential>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.email.as_str() == email)
            .map(|u| Credential {
                user_id: u.id,
                password_hash: u.password_hash.clone(),
            }))
    }
}

/// Test application that spawns a real gRPC server
pub struct TestApp {
    pub address: String,
    pub client: UserServiceClient<Channel>,
    pub repository: Arc<InMemoryUserRepository>,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let secret = SigningSecret::new(TEST_SECRET).unwrap();
        let settings = TokenSettings::default();
        let hasher = PasswordHasher::with_params(CostParams {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
            ..CostParams::default()
        });

        let repository = Arc::new(InMemoryUserRepository::default());
        let authenticator = Arc::new(Authenticator::new(&secret, hasher, settings.clone()));
        let user_service = Arc::new(UserService::new(Arc::clone(&repository), authenticator, 2));
        let grpc_service = UserGrpcService::new(user_service, ValidationRules::default());

        tokio::spawn(async move {
            Server::builder()
                .add_service(UserServiceServer::new(grpc_service))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Server error");
        });

        let client = UserServiceClient::connect(address.clone())
            .await
            .expect("Failed to connect to gRPC server");

        Self {
            address,
            client,
            repository,
            jwt_handler: JwtHandler::new(&secret, settings.issuer),
        }
    }
}
