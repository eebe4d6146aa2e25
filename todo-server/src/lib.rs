pub mod config {
    use serde::Deserialize;

    #[derive(Deserialize, Debug, Clone)]
    pub struct Config {
        #[serde(default = "default_db_url")]
        pub db_url: String,
        #[serde(default = "default_port")]
        pub port: u16,
    }

    impl Config {
        /// Loads configuration from environment variables.
        pub fn from_env() -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(config::Environment::default())
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }
    }

    fn default_db_url() -> String {
        "sqlite::memory:".to_string()
    }

    fn default_port() -> u16 {
        8080
    }
}

pub mod db {
    use migration::MigratorTrait;
    use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
    use std::time::Duration;

    const IN_MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

    /// Opens a connection pool for `db_url` and applies all pending migrations.
    ///
    /// An in-memory SQLite database only lives as long as its connection, so
    /// such URLs are pinned to a single pooled connection.
    ///
    /// The pool must never recycle that connection: a replacement would open a
    /// fresh, unmigrated database and every later query would fail. Idle and
    /// lifetime limits are therefore set far beyond any realistic uptime.
    #[tracing::instrument(skip(db_url))]
    pub async fn connect(db_url: &str) -> Result<DatabaseConnection, DbErr> {
        let mut options = ConnectOptions::new(db_url);
        if db_url.starts_with("sqlite") && db_url.contains(":memory:") {
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(IN_MEMORY_CONNECTION_LIFETIME)
                .max_lifetime(IN_MEMORY_CONNECTION_LIFETIME);
            tracing::warn!("Using an in-memory database; data is lost when the process exits");
        }

        let db = Database::connect(options).await?;
        migration::Migrator::up(&db, None).await?;
        tracing::info!("Database migrations applied successfully");
        Ok(db)
    }
}

pub mod entities;
pub mod health;
pub mod todo;
pub mod web;
