//! MySQL connection pool

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tg_shared::DatabaseConfig;
use tracing::info;

use crate::InfrastructureError;

/// Snapshot of pool usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    pub size: u32,
    pub idle: usize,
    pub max_connections: u32,
}

#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    config: DatabaseConfig,
}

impl DatabasePool {
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout)))
            .connect(&config.url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "Database connection pool created"
        );
        Ok(Self { pool, config })
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Apply pending schema migrations from `infra/migrations`
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(one == 1)
    }

    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
            max_connections: self.config.max_connections,
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
