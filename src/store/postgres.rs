//! Postgres-backed match store.
//!
//! # Design Decisions
//! - Counter increments are one `UPDATE ... SET c = c + 1` statement, never read-then-write
//! - Extra time is clamped in the same statement with `LEAST`
//! - `match_date` is selected as `::date` so timestamp columns come back date-only
//! - Listing is ordered by primary key

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::model::{Counter, Match, MatchId, NewMatch};
use crate::store::traits::{MatchStore, StoreKind, StoreResult};

const LIST_MATCHES: &str = r#"
    SELECT id, home_team, away_team, match_date::date AS match_date,
           goals, yellow_cards, red_cards, extra_time
    FROM matches
    ORDER BY id"#;

const GET_MATCH: &str = r#"
    SELECT id, home_team, away_team, match_date::date AS match_date,
           goals, yellow_cards, red_cards, extra_time
    FROM matches
    WHERE id = $1"#;

const INSERT_MATCH: &str = r#"
    INSERT INTO matches (home_team, away_team, match_date, goals, yellow_cards, red_cards, extra_time)
    VALUES ($1, $2, $3, 0, 0, 0, 0)
    RETURNING id, home_team, away_team, match_date::date AS match_date,
              goals, yellow_cards, red_cards, extra_time"#;

const UPDATE_MATCH: &str = r#"
    UPDATE matches
    SET home_team = $1, away_team = $2, match_date = $3
    WHERE id = $4
    RETURNING id, home_team, away_team, match_date::date AS match_date,
              goals, yellow_cards, red_cards, extra_time"#;

const DELETE_MATCH: &str = r#"
    DELETE FROM matches
    WHERE id = $1
    RETURNING id, home_team, away_team, match_date::date AS match_date,
              goals, yellow_cards, red_cards, extra_time"#;

const BUMP_EXTRA_TIME: &str = r#"
    UPDATE matches
    SET extra_time = LEAST(extra_time + 1, $2)
    WHERE id = $1
    RETURNING extra_time"#;

fn increment_statement(counter: Counter) -> &'static str {
    match counter {
        Counter::Goals => "UPDATE matches SET goals = goals + 1 WHERE id = $1",
        Counter::YellowCards => "UPDATE matches SET yellow_cards = yellow_cards + 1 WHERE id = $1",
        Counter::RedCards => "UPDATE matches SET red_cards = red_cards + 1 WHERE id = $1",
    }
}

/// Match store over a `sqlx` connection pool.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Open a pool against the configured database and verify it answers.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ping().await?;
        Ok(store)
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for PostgresStore {
    async fn list(&self) -> StoreResult<Vec<Match>> {
        let rows = sqlx::query_as::<_, Match>(LIST_MATCHES)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: MatchId) -> StoreResult<Option<Match>> {
        let row = sqlx::query_as::<_, Match>(GET_MATCH)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, fields: NewMatch) -> StoreResult<Match> {
        let row = sqlx::query_as::<_, Match>(INSERT_MATCH)
            .bind(&fields.home_team)
            .bind(&fields.away_team)
            .bind(fields.match_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: MatchId, fields: NewMatch) -> StoreResult<Option<Match>> {
        let row = sqlx::query_as::<_, Match>(UPDATE_MATCH)
            .bind(&fields.home_team)
            .bind(&fields.away_team)
            .bind(fields.match_date)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: MatchId) -> StoreResult<Option<Match>> {
        let row = sqlx::query_as::<_, Match>(DELETE_MATCH)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn increment(&self, id: MatchId, counter: Counter) -> StoreResult<bool> {
        let result = sqlx::query(increment_statement(counter))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn bump_extra_time(&self, id: MatchId, cap: i32) -> StoreResult<Option<i32>> {
        let value = sqlx::query_scalar::<_, i32>(BUMP_EXTRA_TIME)
            .bind(id)
            .bind(cap)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Postgres
    }
}
