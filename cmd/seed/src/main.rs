//! Seeds the three demo profiles (Sophie, Milan, Nora).
//!
//! Safe to run repeatedly: a profile whose email is already registered
//! is skipped, not duplicated.

use std::sync::Arc;

use anyhow::Context;
use auth_adapters::Argon2AuthProvider;
use configs::AppConfig;
use domains::{AppError, DatingRepo, ProfilePatch, RelationshipStatus};
use services::AccountService;
use storage_adapters::JsonFileRepo;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "db-postgres")]
use secrecy::ExposeSecret;
#[cfg(feature = "db-postgres")]
use storage_adapters::PgDatingRepo;

const DEMO_PASSWORD: &str = "demo123";

struct SeedUser {
    name: &'static str,
    email: &'static str,
    relationship_status: RelationshipStatus,
    photo: &'static str,
    bio: &'static str,
    age: i16,
}

const SEED_USERS: [SeedUser; 3] = [
    SeedUser {
        name: "Sophie",
        email: "sophie@example.com",
        relationship_status: RelationshipStatus::Single,
        photo: "https://images.unsplash.com/photo-1524504388940-b1c1722653e1?w=600",
        bio: "Love coffee walks and live music.",
        age: 27,
    },
    SeedUser {
        name: "Milan",
        email: "milan@example.com",
        relationship_status: RelationshipStatus::Single,
        photo: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=600",
        bio: "Builder, reader, weekend cyclist.",
        age: 29,
    },
    SeedUser {
        name: "Nora",
        email: "nora@example.com",
        relationship_status: RelationshipStatus::NotSingle,
        photo: "https://images.unsplash.com/photo-1487412720507-e7ab37603c6f?w=600",
        bio: "Best wingwoman in town.",
        age: 30,
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("loading configuration")?;

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
            Arc::new(pg)
        }
        #[cfg(not(feature = "db-postgres"))]
        Some(_) => anyhow::bail!("database_url is set but this build lacks the db-postgres feature"),
        None => Arc::new(JsonFileRepo::open(&config.data_file).context("opening the file store")?),
    };

    let accounts = AccountService::new(Arc::clone(&repo), Arc::new(Argon2AuthProvider::new()));

    for user in &SEED_USERS {
        let session = match accounts
            .register(user.email, DEMO_PASSWORD, user.name, user.relationship_status)
            .await
        {
            Ok(session) => session,
            Err(AppError::Conflict(_)) => {
                tracing::info!(email = user.email, "already seeded, skipping");
                continue;
            }
            Err(err) => return Err(err).with_context(|| format!("seeding {}", user.email)),
        };

        let patch = ProfilePatch {
            photo: Some(user.photo.to_string()),
            bio: Some(user.bio.to_string()),
            age: Some(user.age),
            ..ProfilePatch::default()
        };
        accounts
            .update_profile(session.user.id, patch)
            .await
            .with_context(|| format!("filling in the {} profile", user.name))?;
        tracing::info!(email = user.email, id = %session.user.id, "seeded");
    }

    Ok(())
}
