use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use sharkservers::server::{
    config::Config,
    error::AppError,
    router,
    service::{admin::code::AdminCodeService, chat::ChatBroadcaster},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sea_orm=warn")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    startup::seed_defaults(&db).await?;

    let session = startup::connect_to_session(&db, &config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let admin_code_service = AdminCodeService::new();
    let chat = ChatBroadcaster::default();

    if config.steam_api_key.is_none() {
        tracing::warn!("STEAM_API_KEY is not set, Steam account linking is disabled");
    }

    // Check for admin users and print a registration code if none exist
    startup::check_for_admin(&db, &config, &admin_code_service).await?;

    let app = router::router(&config)?
        .with_state(AppState::new(
            db,
            http_client,
            admin_code_service,
            chat,
            &config,
        ))
        .layer(session);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
    tracing::info!("Shutting down");
}
