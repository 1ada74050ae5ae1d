//! Storage abstraction for match records.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Counter, Match, MatchId, NewMatch};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection or query failure in the database.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The in-memory id counter cannot advance any further.
    #[error("match id space exhausted")]
    IdSpaceExhausted,

    /// An increment would push a counter past `i32::MAX`.
    #[error("{counter} counter of match {id} is at its maximum")]
    CounterOverflow { id: MatchId, counter: Counter },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Which implementation backs a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    #[default]
    Postgres,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Memory => "memory",
            StoreKind::Postgres => "postgres",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence of match rows.
///
/// Every method touches at most one row. Lookups that find nothing return
/// `Ok(None)` / `Ok(false)`; `Err` is reserved for backend failures.
#[async_trait]
pub trait MatchStore: Send + Sync + 'static {
    /// All matches, in the backend's natural order.
    async fn list(&self) -> StoreResult<Vec<Match>>;

    async fn get(&self, id: MatchId) -> StoreResult<Option<Match>>;

    /// Persist a new match with every counter at zero and return it with its id.
    async fn insert(&self, fields: NewMatch) -> StoreResult<Match>;

    /// Replace teams and date of an existing match. Counters are left as they are.
    async fn update(&self, id: MatchId, fields: NewMatch) -> StoreResult<Option<Match>>;

    /// Remove a match, returning the row that was deleted.
    async fn delete(&self, id: MatchId) -> StoreResult<Option<Match>>;

    /// Add exactly one to `counter` as a single atomic step.
    ///
    /// Returns `false` when no match has this id.
    async fn increment(&self, id: MatchId, counter: Counter) -> StoreResult<bool>;

    /// Set extra time to `min(extra_time + 1, cap)` atomically and return the new value.
    async fn bump_extra_time(&self, id: MatchId, cap: i32) -> StoreResult<Option<i32>>;

    /// Cheap reachability check.
    async fn ping(&self) -> StoreResult<()>;

    fn kind(&self) -> StoreKind;
}
