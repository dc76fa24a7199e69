use std::net::TcpListener;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use league_results_backend::run;
use league_results_backend::config::settings::{get_config, get_jwt_settings};
use league_results_backend::db::LeagueStore;
use league_results_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = get_config().map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Failed to read the config: {}", e))
    })?;

    let subscriber = get_subscriber(
        "league-results-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let jwt_settings = get_jwt_settings(&config);

    // Only try to establish connection when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(16)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(config.database.connection_string().expose_secret())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&connection_pool).await {
        tracing::error!("Failed to migrate the database: {}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
    }

    let store = LeagueStore::new(connection_pool);
    if let Err(e) = store
        .seed_admin(
            &config.application.admin_username,
            &config.application.admin_name,
            &config.application.admin_password,
        )
        .await
    {
        tracing::error!("Failed to seed admin user: {}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
    }

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    let result = run(listener, store.clone(), jwt_settings)?.await;

    store.close().await;
    result
}
