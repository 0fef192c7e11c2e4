use std::sync::Arc;

use anyhow::Error;
use api_gateway::config::Config;
use api_gateway::inbound::http::create_router;
use api_gateway::outbound::grpc::GrpcUserGateway;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_gateway=debug,error_model=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "api-gateway",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        user_service_grpc_url = %config.user_service.grpc_url,
        user_service_timeout_seconds = config.user_service.timeout().as_secs(),
        "Configuration loaded"
    );

    let user_gateway = Arc::new(GrpcUserGateway::new(&config.user_service)?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Server Listening"
    );

    let application = create_router(user_gateway);

    axum::serve(listener, application)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
