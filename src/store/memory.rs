//! In-process match store.
//!
//! Rows live in a `Vec` so listing returns them in insertion order. Ids come
//! from a monotonic counter and are never reused, even after deletes.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{Counter, Match, MatchId, NewMatch};
use crate::store::traits::{MatchStore, StoreError, StoreKind, StoreResult};

#[derive(Debug, Default)]
struct Rows {
    last_id: i32,
    matches: Vec<Match>,
}

impl Rows {
    fn position(&self, id: MatchId) -> Option<usize> {
        self.matches.iter().position(|m| m.id == id)
    }

    fn find_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }
}

/// A match store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Rows>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Match>> {
        Ok(self.rows.read().await.matches.clone())
    }

    async fn get(&self, id: MatchId) -> StoreResult<Option<Match>> {
        let rows = self.rows.read().await;
        Ok(rows.matches.iter().find(|m| m.id == id).cloned())
    }

    async fn insert(&self, fields: NewMatch) -> StoreResult<Match> {
        let mut rows = self.rows.write().await;
        let next = rows.last_id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;
        rows.last_id = next;

        let created = Match::new(MatchId(next), fields);
        rows.matches.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: MatchId, fields: NewMatch) -> StoreResult<Option<Match>> {
        let mut rows = self.rows.write().await;
        Ok(rows.find_mut(id).map(|m| {
            m.apply(fields);
            m.clone()
        }))
    }

    async fn delete(&self, id: MatchId) -> StoreResult<Option<Match>> {
        let mut rows = self.rows.write().await;
        Ok(rows.position(id).map(|idx| rows.matches.remove(idx)))
    }

    async fn increment(&self, id: MatchId, counter: Counter) -> StoreResult<bool> {
        let mut rows = self.rows.write().await;
        match rows.find_mut(id) {
            Some(m) => {
                let value = m.counter_mut(counter);
                *value = value
                    .checked_add(1)
                    .ok_or(StoreError::CounterOverflow { id, counter })?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn bump_extra_time(&self, id: MatchId, cap: i32) -> StoreResult<Option<i32>> {
        let mut rows = self.rows.write().await;
        Ok(rows.find_mut(id).map(|m| {
            m.extra_time = m.extra_time.saturating_add(1).min(cap);
            m.extra_time
        }))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }
}
