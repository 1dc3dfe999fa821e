//! # wingmate Binary
//!
//! The entry point that assembles the application: configuration,
//! store selection, auth provider, router, serve.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::AppState;
use auth_adapters::Argon2AuthProvider;
use configs::AppConfig;
use domains::DatingRepo;
use storage_adapters::JsonFileRepo;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "db-postgres")]
use secrecy::ExposeSecret;
#[cfg(feature = "db-postgres")]
use storage_adapters::PgDatingRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Configuration
    let config = AppConfig::load().context("loading configuration")?;

    // 2. Store selection: Postgres when configured, JSON file otherwise
    let repo: Arc<dyn DatingRepo> = match &config.database_url {
        #[cfg(feature = "db-postgres")]
        Some(url) => {
            let pg = PgDatingRepo::connect(url.expose_secret())
                .await
                .context("connecting to postgres")?;
            sqlx::migrate!("../../migrations")
                .run(pg.pool())
                .await
                .context("running migrations")?;
            tracing::info!("using the postgres store");
            Arc::new(pg)
        }
        #[cfg(not(feature = "db-postgres"))]
        Some(_) => anyhow::bail!("database_url is set but this build lacks the db-postgres feature"),
        None => {
            let repo = JsonFileRepo::open(&config.data_file).context("opening the file store")?;
            tracing::info!(path = %repo.path().display(), "using the JSON file store (demo only)");
            Arc::new(repo)
        }
    };

    // 3. Auth provider
    let auth = Arc::new(Argon2AuthProvider::new());

    // 4. Router + serve
    let app = api_adapters::router(AppState::new(repo, auth));
    let address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    tracing::info!("wingmate listening on http://{address}");
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
