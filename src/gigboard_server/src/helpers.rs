use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

use gigboard_adapters::Settings;

pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Connect to Postgres and bring the schema up to date.
///
/// # Panics
///
/// Panics when the pool cannot be created or a migration fails. The server
/// cannot do anything useful without its database, so startup stops here.
pub async fn configure_postgresql(settings: &Settings) -> PgPool {
    let pool = get_postgres_pool(
        settings.postgres.url.expose_secret(),
        settings.postgres.max_connections,
    )
    .await
    .expect("Failed to create Postgres connection pool!");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
