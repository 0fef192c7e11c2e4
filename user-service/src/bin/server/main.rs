use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_proto::user_service_server::UserServiceServer;
use user_service::config::Config;
use user_service::domain::user::service::UserService;
use user_service::inbound::grpc::UserGrpcService;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,auth=debug,error_model=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // Missing secret or inconsistent limits abort startup here.
    let signing_secret = config.jwt.signing_secret()?;
    let token_settings = config.jwt.token_settings()?;
    let validation_rules = config.validation.rules()?;
    let cost_params = config.password.cost_params();

    tracing::info!(
        grpc_port = config.server.grpc_port,
        issuer = %token_settings.issuer,
        memory_kib = cost_params.memory_kib,
        iterations = cost_params.iterations,
        parallelism = cost_params.parallelism,
        max_concurrent_hashes = config.password.max_concurrent,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        &signing_secret,
        PasswordHasher::with_params(cost_params),
        token_settings,
    ));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        user_repository,
        authenticator,
        config.password.max_concurrent,
    ));

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = UserGrpcService::new(user_service, validation_rules);
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    Server::builder()
        .add_service(UserServiceServer::new(grpc_service))
        .serve_with_shutdown(grpc_address, async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
