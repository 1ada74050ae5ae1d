//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the configured match store
//! - Retry the database connection with quadratic backoff before giving up

use std::sync::Arc;

use thiserror::Error;

use crate::config::ServiceConfig;
use crate::resilience::{retry, RetryError, RetryPolicy};
use crate::store::{MatchStore, MemoryStore, PostgresStore, StoreError, StoreKind};

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database unreachable: {0}")]
    Database(#[from] RetryError<StoreError>),
}

/// Open the store selected by `config.store.backend`.
pub async fn open_store(config: &ServiceConfig) -> Result<Arc<dyn MatchStore>, StartupError> {
    match config.store.backend {
        StoreKind::Memory => {
            tracing::info!("Using in-memory match store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreKind::Postgres => {
            let db = &config.database;
            let policy = RetryPolicy::for_database(db);
            tracing::info!(
                host = %db.host,
                port = db.port,
                database = %db.name,
                max_attempts = policy.max_attempts,
                "Connecting to PostgreSQL"
            );

            let store = retry(policy, |attempt| {
                tracing::debug!(attempt = attempt + 1, "Opening database pool");
                PostgresStore::connect(db)
            })
            .await?;

            tracing::info!("Connected to PostgreSQL");
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    #[tokio::test]
    async fn test_memory_backend_opens_immediately() {
        let config = ServiceConfig {
            store: StoreConfig {
                backend: StoreKind::Memory,
            },
            ..ServiceConfig::default()
        };

        let store = open_store(&config).await.unwrap();
        assert_eq!(store.kind(), StoreKind::Memory);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_database_fails_after_all_attempts() {
        let mut config = ServiceConfig::default();
        config.database.host = "127.0.0.1".into();
        config.database.port = 1;
        config.database.connect_attempts = 2;
        config.database.connect_backoff_base_ms = 1;
        config.database.acquire_timeout_secs = 1;

        let err = match open_store(&config).await {
            Ok(_) => panic!("expected startup to fail"),
            Err(e) => e,
        };
        let StartupError::Database(inner) = err;
        assert_eq!(inner.attempts, 2);
    }
}
