use secrecy::ExposeSecret;
use sqlx::{PgPool, PgConnection, Connection, Executor};
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;

use league_results_backend::run;
use league_results_backend::config::settings::{get_config, get_jwt_settings, DatabaseSettings};
use league_results_backend::db::LeagueStore;
use league_results_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: LeagueStore,
    pub admin_username: String,
    pub admin_password: String,
}

fn bind_random_port() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    (listener, format!("http://127.0.0.1:{}", port))
}

/// Spawn the app against a fresh, migrated database with the admin seeded
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let (listener, address) = bind_random_port();
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database).await;
    let store = LeagueStore::new(connection_pool);

    let admin_username = configuration.application.admin_username.clone();
    let admin_password = configuration.application.admin_password.expose_secret().to_string();
    store
        .seed_admin(
            &configuration.application.admin_username,
            &configuration.application.admin_name,
            &configuration.application.admin_password,
        )
        .await
        .expect("Failed to seed admin user");

    let jwt_settings = get_jwt_settings(&configuration);
    let server = run(listener, store.clone(), jwt_settings)
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        admin_username,
        admin_password,
    }
}

/// Spawn the app with a pool that never connects.
/// Only usable for requests that are answered before touching the database.
pub async fn spawn_app_without_db() -> TestApp {
    Lazy::force(&TRACING);

    let (listener, address) = bind_random_port();
    let configuration = get_config().expect("Failed to read configuration.");
    let connection_pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy(configuration.database.connection_string().expose_secret())
        .expect("Failed to create lazy pool");
    let store = LeagueStore::new(connection_pool);

    let jwt_settings = get_jwt_settings(&configuration);
    let server = run(listener, store.clone(), jwt_settings)
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        admin_username: configuration.application.admin_username.clone(),
        admin_password: configuration.application.admin_password.expose_secret().to_string(),
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}
