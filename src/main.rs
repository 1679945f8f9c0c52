use anyhow::Context;
use carlot::router::init_router;
use carlot::state::init_app_state;
use carlot_db::{MIGRATOR, init_db_pool};
use carlot_observability::{LoggingConfig, init_logging};
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging(&LoggingConfig::from_env())?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    MIGRATOR.run(&pool).await.context("failed to run migrations")?;

    let state = init_app_state(pool);
    if state.jwt_config.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set, using the development secret");
    }

    let address = state.server_config.bind_address();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    tracing::info!("🚀 Server running on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}
