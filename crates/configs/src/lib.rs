//! # configs
//!
//! Runtime configuration for the wingmate binaries: an optional
//! `wingmate.toml` next to the binary, overridden by `WINGMATE_*`
//! environment variables (a `.env` file is honored via dotenvy).

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Invalid(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,

    /// Postgres connection string. When absent the server falls back
    /// to the JSON file store, which is demo-only.
    pub database_url: Option<SecretString>,

    /// Path of the JSON file store used without a database URL.
    pub data_file: PathBuf,
}

impl AppConfig {
    /// Loads `.env`, then `wingmate.toml` (optional), then the
    /// `WINGMATE_*` environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_file(None)
    }

    fn load_file(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("port", 4000)?
            .set_default("data_file", "./data/db.json")?;

        builder = match file {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name("wingmate").required(false)),
        };

        let settings = builder
            .add_source(config::Environment::with_prefix("WINGMATE"))
            .build()?;
        let loaded: Self = settings.try_deserialize()?;

        if loaded.database_url.is_none() {
            tracing::warn!(
                data_file = %loaded.data_file.display(),
                "no database_url configured; using the single-process JSON file store"
            );
        }
        Ok(loaded)
    }
}
