use std::error::Error;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spaceweather_portal::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let state = AppState::new(pool, &config);
    let app = create_app(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server is running on http://{}", config.bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
