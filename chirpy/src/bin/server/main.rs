use std::sync::Arc;

use auth::Authenticator;
use chirpy::config::Config;
use chirpy::domain::account::ports::AccountServicePort;
use chirpy::domain::account::ports::UserRepository;
use chirpy::domain::account::service::AccountService;
use chirpy::domain::metrics::HitCounter;
use chirpy::domain::platform::Platform;
use chirpy::domain::session::ports::RefreshTokenRepository;
use chirpy::domain::session::ports::SessionServicePort;
use chirpy::domain::session::service::SessionService;
use chirpy::inbound::http::router::create_router;
use chirpy::outbound::repositories::InMemoryRefreshTokenRepository;
use chirpy::outbound::repositories::InMemoryUserRepository;
use chirpy::outbound::repositories::PostgresRefreshTokenRepository;
use chirpy::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type Services = (Arc<dyn AccountServicePort>, Arc<dyn SessionServicePort>);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "chirpy",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        platform = %config.platform,
        persistent = config.database.url.is_some(),
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let (account_service, session_service) = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .acquire_timeout(config.database.acquire_timeout())
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_services(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresRefreshTokenRepository::new(pg_pool)),
                authenticator,
                config.platform,
            )
        }
        None => {
            tracing::warn!("DATABASE__URL not set, state is kept in memory and lost on exit");
            let users = Arc::new(InMemoryUserRepository::new());
            build_services(
                Arc::clone(&users),
                Arc::new(InMemoryRefreshTokenRepository::with_users(users)),
                authenticator,
                config.platform,
            )
        }
    };

    let hits = Arc::new(HitCounter::new());

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, session_service, hits);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn build_services<UR, TR>(
    users: Arc<UR>,
    tokens: Arc<TR>,
    authenticator: Arc<Authenticator>,
    platform: Platform,
) -> Services
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    let account_service: Arc<dyn AccountServicePort> =
        Arc::new(AccountService::new(Arc::clone(&users)));
    let session_service: Arc<dyn SessionServicePort> =
        Arc::new(SessionService::new(users, tokens, authenticator, platform));

    (account_service, session_service)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
